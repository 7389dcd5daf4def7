/*!
 * The translation pipeline.
 *
 * Drives a cue list through the full sequence: extract structural
 * formatting, pack the stripped texts into batches, send each batch to
 * the backend, walk the response tree back into segments, clean and
 * reassemble each cue, and finally collapse empty continuation cues.
 *
 * Batches are sent strictly one at a time. Each completed batch is
 * applied to the cue list before the next is sent, so a failure or a
 * cancellation midway leaves every finished batch translated and the
 * rest untouched. The merge collapse pass runs on every exit path,
 * completed, cancelled, or failed, before the result is handed back.
 */

use std::sync::Arc;

use log::{debug, info};

use crate::app_config::{FormatFamily, MergeStrategy};
use crate::backends::TranslationBackend;
use crate::errors::TranslationError;
use crate::subtitle_processor::SubtitleEntry;
use crate::translation::batch::Batcher;
use crate::translation::cleaner::TextCleaner;
use crate::translation::merge::MergeCollapser;
use crate::translation::response::ResponseWalker;
use crate::translation::tags::TagExtractor;

/// Per-run settings the pipeline needs beyond the backend itself
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Language code of the cue text being translated
    pub source_language: String,

    /// Language code to translate into
    pub target_language: String,

    /// Output format family, controls format-specific cleanup
    pub format_family: FormatFamily,

    /// Batching strategy the cue list was prepared with
    pub merge_strategy: MergeStrategy,

    /// Target line width for re-wrapped cues
    pub wrap_width: usize,
}

/// Snapshot handed to the progress callback after each batch
#[derive(Debug, Clone, Copy)]
pub struct BatchProgress {
    /// Batches applied so far
    pub batches_completed: usize,

    /// Batches planned for this run
    pub total_batches: usize,

    /// Cues translated so far
    pub cues_completed: usize,

    /// Cues planned for this run
    pub total_cues: usize,

    /// Index of the last cue in the batch just applied
    pub last_cue_index: usize,
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Batches planned for this run
    pub total_batches: usize,

    /// Batches sent and applied
    pub batches_sent: usize,

    /// Cues whose text was replaced with a translation
    pub cues_translated: usize,

    /// Empty continuation cues folded away by the merge collapse pass
    pub cues_merged: usize,

    /// Whether the run stopped early at the caller's request
    pub cancelled: bool,
}

/// Translates a cue list in place through one backend
pub struct TranslationPipeline {
    backend: Arc<dyn TranslationBackend>,
    options: PipelineOptions,
    cleaner: TextCleaner,
}

impl TranslationPipeline {
    pub fn new(backend: Arc<dyn TranslationBackend>, options: PipelineOptions) -> Self {
        let cleaner = TextCleaner::new(options.format_family, options.wrap_width);
        Self {
            backend,
            options,
            cleaner,
        }
    }

    /// Translate every non-empty cue in `entries`, mutating the list in
    /// place.
    ///
    /// The progress callback fires after each applied batch; returning
    /// `false` cancels the run before the next batch is sent. Completed
    /// batches stay applied on cancellation and on error. Unless the run
    /// used the single-cue strategy, the merge collapse pass runs before
    /// this function returns, on every exit path.
    pub async fn translate_entries(
        &self,
        entries: &mut Vec<SubtitleEntry>,
        mut progress: impl FnMut(BatchProgress) -> bool + Send,
    ) -> Result<RunSummary, TranslationError> {
        let outcome = self.run_batches(entries, &mut progress).await;

        let mut cues_merged = 0;
        if self.options.merge_strategy != MergeStrategy::SingleCue {
            cues_merged = MergeCollapser::collapse(entries);
        }

        let mut summary = outcome?;
        summary.cues_merged = cues_merged;
        Ok(summary)
    }

    async fn run_batches(
        &self,
        entries: &mut [SubtitleEntry],
        progress: &mut (dyn FnMut(BatchProgress) -> bool + Send),
    ) -> Result<RunSummary, TranslationError> {
        if entries.is_empty() {
            return Ok(RunSummary::default());
        }

        let mut stripped_texts = Vec::with_capacity(entries.len());
        let mut descriptors = Vec::with_capacity(entries.len());
        for entry in entries.iter() {
            let (stripped, descriptor) = TagExtractor::extract(&entry.text);
            stripped_texts.push(stripped);
            descriptors.push(descriptor);
        }

        let batches = Batcher::pack(
            &stripped_texts,
            self.backend.max_batch_size(),
            self.backend.max_text_size(),
        )?;

        let total_batches = batches.len();
        let total_cues: usize = batches.iter().map(|batch| batch.len()).sum();
        let mut summary = RunSummary {
            total_batches,
            ..RunSummary::default()
        };
        if batches.is_empty() {
            return Ok(summary);
        }

        info!(
            "Translating {} cue(s) in {} batch(es) from {} to {} via {}",
            total_cues,
            total_batches,
            self.options.source_language,
            self.options.target_language,
            self.backend.name()
        );

        for (batch_index, batch) in batches.iter().enumerate() {
            debug!(
                "Sending batch {}/{}: {} cue(s), {} character(s)",
                batch_index + 1,
                total_batches,
                batch.len(),
                batch.combined_size()
            );

            let response = self
                .backend
                .translate(
                    &self.options.source_language,
                    &self.options.target_language,
                    &batch.texts,
                )
                .await?;
            let segments = ResponseWalker::walk(&response, batch.len())?;

            for (segment, &cue_index) in segments.iter().zip(&batch.cue_indices) {
                entries[cue_index].text =
                    self.cleaner.clean(segment, descriptors[cue_index].clone());
            }

            summary.batches_sent += 1;
            summary.cues_translated += batch.len();

            let keep_going = progress(BatchProgress {
                batches_completed: summary.batches_sent,
                total_batches,
                cues_completed: summary.cues_translated,
                total_cues,
                last_cue_index: batch.cue_indices.last().copied().unwrap_or(0),
            });
            if !keep_going && summary.batches_sent < total_batches {
                info!(
                    "Translation cancelled after {} of {} batch(es)",
                    summary.batches_sent, total_batches
                );
                summary.cancelled = true;
                break;
            }
        }

        Ok(summary)
    }
}
