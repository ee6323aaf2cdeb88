//! Input manager for handling different file types

use crate::error::{AtsScannerError, Result};
use crate::input::file_detector::{file_meta, FileType};
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::structure::FileMeta;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Shortest extracted text accepted as a resume or job description
pub const MIN_TEXT_CHARS: usize = 50;

/// One scan request's documents; never mutated after loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    pub resume_text: String,
    pub job_description_text: String,
    pub file_meta: FileMeta,
}

impl RawInput {
    /// Build an input from text already in memory, applying the same length
    /// checks as file loading
    pub fn new(resume_text: impl Into<String>, job_description_text: impl Into<String>, file_meta: FileMeta) -> Result<Self> {
        let input = Self {
            resume_text: resume_text.into(),
            job_description_text: job_description_text.into(),
            file_meta,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<()> {
        validate_text("resume", &self.resume_text)?;
        validate_text("job description", &self.job_description_text)
    }
}

fn validate_text(label: &str, text: &str) -> Result<()> {
    let chars = text.trim().chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(AtsScannerError::InvalidInput(format!(
            "The {} text is too short ({} characters, need at least {})",
            label, chars, MIN_TEXT_CHARS
        )));
    }
    Ok(())
}

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(AtsScannerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Word => {
                return Err(AtsScannerError::UnsupportedFormat(format!(
                    "Word documents cannot be read directly, export '{}' to PDF or text",
                    path.display()
                )));
            }
            FileType::Unknown => {
                return Err(AtsScannerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Load both documents of a scan and validate their text
    pub async fn load_raw_input(&mut self, resume_path: &Path, job_path: &Path) -> Result<RawInput> {
        let resume_text = self.extract_text(resume_path).await?;
        let job_text = self.extract_text(job_path).await?;
        RawInput::new(resume_text, job_text, file_meta(resume_path))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
