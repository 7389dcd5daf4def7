/*!
 * Format-preserving translation of subtitle cue lists.
 *
 * This module contains the stages a cue list passes through on its way
 * to a machine-translation backend and back. It is split into several
 * submodules:
 *
 * - `tags`: Extraction and reapplication of structural formatting
 * - `batch`: Packing stripped cue texts into bounded batch requests
 * - `response`: Recovery of translated segments from backend responses
 * - `cleaner`: Post-translation cleanup and cue reassembly
 * - `merge`: Collapse of empty continuation cues
 * - `wrap`: Line re-wrapping for cues that lost their line break
 * - `pipeline`: The orchestrator tying the stages together
 */

// Re-export main types for easier usage
pub use self::batch::{BatchRequest, Batcher, SPLITTER};
pub use self::cleaner::TextCleaner;
pub use self::merge::MergeCollapser;
pub use self::pipeline::{BatchProgress, PipelineOptions, RunSummary, TranslationPipeline};
pub use self::response::ResponseWalker;
pub use self::tags::{FormattingDescriptor, TagExtractor, TagRole};
pub use self::wrap::{AutoWrap, BalancedWrapper};

// Submodules
pub mod batch;
pub mod cleaner;
pub mod merge;
pub mod pipeline;
pub mod response;
pub mod tags;
pub mod wrap;
