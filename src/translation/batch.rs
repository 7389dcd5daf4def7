/*!
 * Batch packing for translation requests.
 *
 * Groups stripped cue texts into backend-sized requests. Packing is greedy
 * and order-preserving: no reordering, no splitting one cue's text across
 * two requests. Each request remembers which cue sits behind each offset,
 * so replies can be mapped back without guessing.
 */

use log::debug;

use crate::errors::TranslationError;

/// Delimiter separating cue texts within one logical request. Outbound
/// text must never contain it; the batcher fails closed when it does.
pub const SPLITTER: &str = "+-+";

/// One group of stripped texts bound for a single backend call
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    /// Stripped texts, in cue order
    pub texts: Vec<String>,

    /// Cue index behind each batch offset; same length as `texts`
    pub cue_indices: Vec<usize>,
}

impl BatchRequest {
    /// Number of cues in this request
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// True when the request holds no cues
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Character size of the delimiter-joined payload
    pub fn combined_size(&self) -> usize {
        let text_chars: usize = self.texts.iter().map(|t| t.chars().count()).sum();
        let splitter_chars = SPLITTER.chars().count() * self.texts.len().saturating_sub(1);
        text_chars + splitter_chars
    }
}

/// Packs stripped texts into batches under backend limits
pub struct Batcher;

impl Batcher {
    /// Pack stripped texts into requests, at most `max_batch_size` cues and
    /// `max_text_size` combined characters each.
    ///
    /// Empty texts are never submitted; their translation is the empty
    /// string and they keep their cue index out of every request. A text
    /// larger than `max_text_size` cannot be split, so it travels alone in
    /// its own request.
    pub fn pack(
        stripped_texts: &[String],
        max_batch_size: usize,
        max_text_size: usize,
    ) -> Result<Vec<BatchRequest>, TranslationError> {
        let max_batch_size = max_batch_size.max(1);

        let mut batches = Vec::new();
        let mut current = BatchRequest::default();

        for (cue_index, text) in stripped_texts.iter().enumerate() {
            if text.trim().is_empty() {
                continue;
            }

            if text.contains(SPLITTER) {
                return Err(TranslationError::DelimiterCollision { cue_index });
            }

            let text_size = text.chars().count();

            // Oversized cue: flush whatever is pending, then send it alone
            if text_size > max_text_size {
                if !current.is_empty() {
                    batches.push(std::mem::take(&mut current));
                }
                debug!("Cue {} is oversized ({} chars), sending it in its own request", cue_index, text_size);
                batches.push(BatchRequest {
                    texts: vec![text.clone()],
                    cue_indices: vec![cue_index],
                });
                continue;
            }

            let grown_size = if current.is_empty() {
                text_size
            } else {
                current.combined_size() + SPLITTER.chars().count() + text_size
            };

            if !current.is_empty() && (current.len() >= max_batch_size || grown_size > max_text_size) {
                batches.push(std::mem::take(&mut current));
            }

            current.texts.push(text.clone());
            current.cue_indices.push(cue_index);
        }

        if !current.is_empty() {
            batches.push(current);
        }

        if log::max_level() >= log::LevelFilter::Debug {
            for (i, batch) in batches.iter().enumerate() {
                debug!(
                    "Batch {}: {} cues (indices {:?}, {} chars)",
                    i + 1,
                    batch.len(),
                    batch.cue_indices,
                    batch.combined_size()
                );
            }
        }

        Ok(batches)
    }
}
