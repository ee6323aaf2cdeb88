//! File type detection

use crate::processing::structure::FileMeta;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Word,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "doc" | "docx" => FileType::Word,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    /// MIME type reported to the structural extractor
    pub fn mime_type(&self, path: &Path) -> &'static str {
        match self {
            FileType::Pdf => "application/pdf",
            FileType::Text => "text/plain",
            FileType::Markdown => "text/markdown",
            FileType::Word => {
                let is_docx = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map_or(false, |ext| ext.eq_ignore_ascii_case("docx"));
                if is_docx {
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                } else {
                    "application/msword"
                }
            }
            FileType::Unknown => "application/octet-stream",
        }
    }

    /// Formats we can pull text out of
    pub fn is_readable(&self) -> bool {
        matches!(self, FileType::Pdf | FileType::Text | FileType::Markdown)
    }
}

/// File name and MIME type of an input document
pub fn file_meta(path: &Path) -> FileMeta {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    FileMeta {
        filename,
        mime_type: FileType::from_path(path).mime_type(path).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("markdown"), FileType::Markdown);
        assert_eq!(FileType::from_extension("docx"), FileType::Word);
        assert_eq!(FileType::from_extension("rtf"), FileType::Unknown);
        assert!(!FileType::Word.is_readable());
    }

    #[test]
    fn test_file_meta() {
        let meta = file_meta(Path::new("/tmp/jane_doe-resume.docx"));
        assert_eq!(meta.filename, "jane_doe-resume.docx");
        assert_eq!(
            meta.mime_type,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );

        let meta = file_meta(Path::new("notes"));
        assert_eq!(meta.mime_type, "application/octet-stream");
    }
}
