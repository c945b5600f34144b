use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::{Config, TranslationProvider};
use crate::file_utils::FileManager;
use crate::providers::Provider;
use crate::providers::google::GoogleTranslate;
use crate::providers::libretranslate::LibreTranslate;
use crate::translation::adapter::TranslationAdapter;
use crate::translation::pipeline::translate_document;

// @module: Application controller for chapter translation

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.target_language.is_empty() && !self.config.file_extension.is_empty()
    }

    /// Build the backend client selected by the configuration
    fn build_provider(&self) -> Box<dyn Provider> {
        let translation = &self.config.translation;
        match translation.provider {
            TranslationProvider::Google => Box::new(GoogleTranslate::from_endpoint(
                translation.get_endpoint(),
                translation.get_timeout_secs(),
            )),
            TranslationProvider::LibreTranslate => {
                let api_key = translation.get_api_key();
                Box::new(LibreTranslate::new(
                    translation.get_endpoint(),
                    (!api_key.is_empty()).then_some(api_key),
                    translation.get_timeout_secs(),
                ))
            }
        }
    }

    /// Build the translation adapter from the configuration
    pub fn build_adapter(&self) -> TranslationAdapter {
        TranslationAdapter::new(
            self.build_provider(),
            self.config.target_language.clone(),
            Duration::from_millis(self.config.translation.common.rate_limit_delay_ms),
        )
    }

    /// Run the main workflow over a directory of source documents
    pub async fn run(&self, source_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let adapter = self.build_adapter();
        self.run_with_adapter(source_dir, force_overwrite, &adapter).await
    }

    /// Run the workflow with an explicit adapter.
    ///
    /// Per-file failures are logged and counted; the run continues to the
    /// remaining files and always reports a final completion message.
    pub async fn run_with_adapter(
        &self,
        source_dir: PathBuf,
        force_overwrite: bool,
        adapter: &TranslationAdapter,
    ) -> Result<()> {
        if !FileManager::dir_exists(&source_dir) {
            return Err(anyhow!("Source directory does not exist: {:?}", source_dir));
        }

        let extension = self.config.normalized_extension();
        let files = FileManager::find_files(&source_dir, &extension)
            .with_context(|| format!("Failed to scan source directory: {:?}", source_dir))?;

        if files.is_empty() {
            warn!(
                "No .{} files found in {:?}, nothing to translate",
                extension, source_dir
            );
            return Ok(());
        }

        let output_dir = Self::target_directory(&source_dir, &self.config.target_language)?;
        FileManager::ensure_dir(&output_dir)?;

        info!(
            "Found {} .{} file(s) in {:?}, translating to '{}'",
            files.len(),
            extension,
            source_dir,
            self.config.target_language
        );

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(ProgressStyle::default_bar());

        let mut failed = 0usize;
        let mut skipped = 0usize;

        for file in &files {
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| String::from("unknown"));
            progress.set_message(file_name.clone());

            let output_path = FileManager::generate_output_path(
                file,
                &output_dir,
                &self.config.target_language,
                &extension,
            );

            if output_path.exists() && !force_overwrite {
                warn!(
                    "Skipping {}, translation already exists (use -f to force overwrite)",
                    file_name
                );
                skipped += 1;
            } else {
                match self.process_file(file, &output_path, adapter).await {
                    Ok(()) => debug!("Completed: {}", file_name),
                    Err(e) => {
                        failed += 1;
                        error!("Failed to process {}: {:#}", file_name, e);
                    }
                }
            }

            progress.inc(1);
        }

        progress.finish_and_clear();

        info!(
            "All translations completed: {} translated, {} skipped, {} failed",
            files.len() - skipped - failed,
            skipped,
            failed
        );

        Ok(())
    }

    /// Translate a single file into the output path
    async fn process_file(
        &self,
        input_file: &Path,
        output_path: &Path,
        adapter: &TranslationAdapter,
    ) -> Result<()> {
        let content = FileManager::read_to_string(input_file)?;
        let translated = translate_document(&content, adapter).await;
        FileManager::write_to_file(output_path, &translated)
    }

    /// Sibling output directory named `<dir>.<lang>`
    pub fn target_directory(source_dir: &Path, target_language: &str) -> Result<PathBuf> {
        let name = source_dir
            .file_name()
            .ok_or_else(|| anyhow!("Source directory has no name: {:?}", source_dir))?;
        let sibling = format!("{}.{}", name.to_string_lossy(), target_language);
        Ok(source_dir
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(sibling))
    }
}
