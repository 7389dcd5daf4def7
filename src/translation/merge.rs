/*!
 * Collapse of empty continuation cues after merge-style batching.
 *
 * Strategies that merge a sentence across cue boundaries put the whole
 * translation in the first cue of the run and leave the followers empty.
 * The collapser folds each empty follower into its non-empty predecessor
 * so the output file carries no blank cues.
 */

use log::debug;

use crate::subtitle_processor::SubtitleEntry;

/// Longest span, in milliseconds, a cue may cover after absorbing the
/// empty continuation cue that follows it
const MAX_MERGED_SPAN_MS: u64 = 10_000;

/// Folds empty continuation cues into their predecessors
pub struct MergeCollapser;

impl MergeCollapser {
    /// Remove empty continuation cues, donating their end time to the
    /// preceding non-empty cue.
    ///
    /// A cue is collapsed when its text is blank, the cue before it has
    /// text, and the merged cue would stay under [`MAX_MERGED_SPAN_MS`].
    /// Sweeps repeat until nothing collapses, so a run of several blank
    /// cues folds completely and a second call changes nothing. Survivors
    /// are renumbered sequentially. Returns the number of cues removed.
    pub fn collapse(entries: &mut Vec<SubtitleEntry>) -> usize {
        let mut removed_total = 0;

        loop {
            let mut to_remove: Vec<usize> = Vec::new();

            for i in 0..entries.len().saturating_sub(1) {
                if entries[i].text.trim().is_empty() {
                    continue;
                }
                if !entries[i + 1].text.trim().is_empty() {
                    continue;
                }
                let merged_span = entries[i + 1]
                    .end_time_ms
                    .saturating_sub(entries[i].start_time_ms);
                if merged_span >= MAX_MERGED_SPAN_MS {
                    continue;
                }

                entries[i].end_time_ms = entries[i + 1].end_time_ms;
                to_remove.push(i + 1);
            }

            if to_remove.is_empty() {
                break;
            }

            removed_total += to_remove.len();
            for index in to_remove.into_iter().rev() {
                entries.remove(index);
            }
        }

        if removed_total > 0 {
            for (index, entry) in entries.iter_mut().enumerate() {
                entry.seq_num = index + 1;
            }
            debug!(
                "Merge collapse removed {} empty continuation cue(s)",
                removed_total
            );
        }
        removed_total
    }
}
