//! Fixed extension → format table.

use std::path::Path;

/// Content format tag driving cleanup, title extraction, and split strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Text,
    Html,
    Markdown,
    Code,
    Pdf,
    Word,
    Slides,
    /// PDF-family content reconstructed to HTML by layout analysis. Never
    /// detected from an extension; assigned after extraction.
    PdfHtml,
}

impl FileFormat {
    /// Look up the format for a file name. `None` means unsupported.
    pub fn from_extension(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "md" => Some(Self::Markdown),
            "txt" => Some(Self::Text),
            "html" | "htm" | "shtml" => Some(Self::Html),
            "py" => Some(Self::Code),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Word),
            "pptx" => Some(Self::Slides),
            _ => None,
        }
    }

    /// PDF-family formats need the document-analysis collaborator.
    pub fn requires_analysis(self) -> bool {
        matches!(self, Self::Pdf | Self::Word | Self::Slides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map_to_formats() {
        assert_eq!(FileFormat::from_extension("notes.md"), Some(FileFormat::Markdown));
        assert_eq!(FileFormat::from_extension("a.TXT"), Some(FileFormat::Text));
        assert_eq!(FileFormat::from_extension("page.shtml"), Some(FileFormat::Html));
        assert_eq!(FileFormat::from_extension("tool.py"), Some(FileFormat::Code));
        assert_eq!(FileFormat::from_extension("report.pdf"), Some(FileFormat::Pdf));
    }

    #[test]
    fn unknown_or_missing_extension_is_unsupported() {
        assert_eq!(FileFormat::from_extension("image.png"), None);
        assert_eq!(FileFormat::from_extension("Makefile"), None);
    }

    #[test]
    fn full_paths_are_accepted() {
        assert_eq!(
            FileFormat::from_extension("docs/sub/readme.md"),
            Some(FileFormat::Markdown)
        );
    }

    #[test]
    fn pdf_family_requires_analysis() {
        assert!(FileFormat::Pdf.requires_analysis());
        assert!(FileFormat::Word.requires_analysis());
        assert!(FileFormat::Slides.requires_analysis());
        assert!(!FileFormat::Html.requires_analysis());
        assert!(!FileFormat::PdfHtml.requires_analysis());
    }
}
