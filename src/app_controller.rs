use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::{BackendKind, Config};
use crate::backends::google::GoogleBackend;
use crate::backends::microsoft::MicrosoftBackend;
use crate::backends::{LanguagePair, TranslationBackend};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::subtitle_processor::SubtitleCollection;
use crate::translation::{PipelineOptions, TranslationPipeline};

// @module: Application controller for subtitle translation runs

/// Main application controller for subtitle translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let controller = Self { config };

        Ok(controller)
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.source_language.is_empty() && !self.config.target_language.is_empty()
    }

    /// Languages the configured backend advertises
    pub fn list_languages(&self) -> Vec<LanguagePair> {
        self.build_backend().supported_languages()
    }

    /// Run the main workflow with an input subtitle file and output directory
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<()> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(input_file, output_dir, &multi_progress, force_overwrite)
            .await
    }

    /// Run the controller with progress reporting
    async fn run_with_progress(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();
        let force_overwrite = force_overwrite || self.config.subtitle.overwrite_existing;

        if !input_file.exists() {
            return Err(anyhow::anyhow!(
                "Input file does not exist: {:?}",
                input_file
            ));
        }

        FileManager::ensure_dir(&output_dir)?;

        // Check if translation already exists
        let output_path = output_dir.join(
            self.get_subtitle_output_filename(&input_file, &self.config.target_language),
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, translation already exists (use -f to force overwrite)");
            return Ok(());
        }

        let mut collection =
            SubtitleCollection::load_from_file(&input_file, &self.config.source_language)?;
        info!(
            "Loaded {} cue(s) from {}",
            collection.entries.len(),
            input_file.display()
        );

        let summary = self
            .translate_collection_with_progress(&mut collection, multi_progress)
            .await?;

        collection.write_to_srt(&output_path)?;
        info!("Success: {}", output_path.display());

        let mut outcome = format!(
            "Translated {} cue(s) in {} batch(es)",
            summary.cues_translated, summary.batches_sent
        );
        if summary.cues_merged > 0 {
            outcome.push_str(&format!(", folded {} empty cue(s)", summary.cues_merged));
        }
        info!(
            "{} in {}.",
            outcome,
            Self::format_duration(start_time.elapsed())
        );

        Ok(())
    }

    /// Translate a loaded collection, driving a progress bar from the
    /// pipeline's per-batch callback
    async fn translate_collection_with_progress(
        &self,
        collection: &mut SubtitleCollection,
        multi_progress: &MultiProgress,
    ) -> Result<crate::translation::RunSummary> {
        let backend = self.build_backend();

        info!(
            "🚀 {} ({} → {})",
            self.config.translation.backend.display_name(),
            self.config.source_language,
            self.config.target_language
        );

        let progress_bar = multi_progress.add(ProgressBar::new(0));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let pipeline = TranslationPipeline::new(backend, self.pipeline_options());

        // The callback keeps the bar in sync with applied batches; the
        // CLI never requests cancellation
        let pb = progress_bar.clone();
        let summary = pipeline
            .translate_entries(&mut collection.entries, move |progress| {
                pb.set_length(progress.total_batches as u64);
                pb.set_position(progress.batches_completed as u64);
                true
            })
            .await;

        // Clear rather than finish so folder runs keep a single bar
        progress_bar.finish_and_clear();

        Ok(summary?)
    }

    /// Build the configured backend client
    fn build_backend(&self) -> Arc<dyn TranslationBackend> {
        let api_key = self.config.translation.get_api_key();
        let endpoint = self.config.translation.get_endpoint();

        match self.config.translation.backend {
            BackendKind::Google => Arc::new(GoogleBackend::new(api_key, endpoint)),
            BackendKind::Microsoft => Arc::new(MicrosoftBackend::new(
                api_key,
                endpoint,
                self.config.translation.get_category(),
            )),
        }
    }

    /// Pipeline settings derived from the configuration
    fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            source_language: self.config.source_language.clone(),
            target_language: self.config.target_language.clone(),
            format_family: self.config.subtitle.format_family,
            merge_strategy: self.config.subtitle.merge_strategy,
            wrap_width: self.config.subtitle.wrap_width,
        }
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Run the workflow in folder mode, processing all subtitle files in a
    /// directory. Files that already have a translation are skipped.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let start_time = std::time::Instant::now();
        let force_overwrite = force_overwrite || self.config.subtitle.overwrite_existing;

        if !input_dir.exists() {
            return Err(anyhow::anyhow!(
                "Input directory does not exist: {:?}",
                input_dir
            ));
        }

        let subtitle_files = FileManager::find_files(&input_dir, "srt")?;
        if subtitle_files.is_empty() {
            return Err(anyhow::anyhow!(
                "No subtitle files found in directory: {:?}",
                input_dir
            ));
        }

        let multi_progress = MultiProgress::new();

        let folder_pb = multi_progress.add(ProgressBar::new(subtitle_files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        let mut success_count = 0;
        let mut error_count = 0;
        let mut skip_count = 0;

        for subtitle_file in subtitle_files.iter() {
            let file_name = subtitle_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            folder_pb.set_message(format!("Processing: {}", file_name));

            // Output lands next to the input file
            let output_dir = match subtitle_file.parent() {
                Some(parent) => parent.to_path_buf(),
                None => input_dir.clone(),
            };

            let output_path = output_dir.join(
                self.get_subtitle_output_filename(subtitle_file, &self.config.target_language),
            );

            // A file whose name already carries the target language is a
            // previous run's output
            if output_path == *subtitle_file {
                debug!("Skipping file, already in target language: {}", file_name);
                skip_count += 1;
                folder_pb.inc(1);
                continue;
            }

            if output_path.exists() && !force_overwrite {
                warn!("Skipping file, translation already exists (use -f to force overwrite)");
                skip_count += 1;
                folder_pb.inc(1);
                continue;
            }

            match self
                .run_with_progress(
                    subtitle_file.clone(),
                    output_dir,
                    &multi_progress,
                    force_overwrite,
                )
                .await
            {
                Ok(_) => {
                    success_count += 1;
                }
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    error_count += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors - Duration: {}",
            success_count,
            skip_count,
            error_count,
            Self::format_duration(start_time.elapsed())
        );

        Ok(())
    }

    /// Get the expected output filename for a subtitle file
    fn get_subtitle_output_filename(&self, input_file: &Path, target_language: &str) -> String {
        if input_file.extension().and_then(|ext| ext.to_str()) == Some("srt") {
            if let Some(filename) = input_file.file_name().map(|f| f.to_string_lossy()) {
                let parts: Vec<&str> = filename.split('.').collect();

                // "movie.en.srt" keeps its shape with the language part
                // swapped; a middle part that is not a language code is
                // part of the name
                if parts.len() >= 3
                    && language_utils::validate_language_code(parts[parts.len() - 2]).is_ok()
                {
                    let mut new_parts = parts.clone();
                    new_parts[parts.len() - 2] = target_language;
                    return new_parts.join(".");
                }
            }
        }

        if let Some(stem) = input_file.file_stem() {
            format!("{}.{}.srt", stem.to_string_lossy(), target_language)
        } else {
            format!("output.{}.srt", target_language)
        }
    }
}
