//! Export results.
//!
//! BookStack serves binary exports (PDF, ZIP) straight to the browser, so
//! for those the server hands back where to download them instead of the
//! bytes. Text exports come back verbatim.

use super::urls;
use crate::error::AppError;
use crate::types::ValidationError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    Pdf,
    Plaintext,
    Markdown,
    Zip,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Html,
        ExportFormat::Pdf,
        ExportFormat::Plaintext,
        ExportFormat::Markdown,
        ExportFormat::Zip,
    ];

    /// Path segment BookStack uses for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Plaintext => "plaintext",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Zip => "zip",
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, ExportFormat::Pdf | ExportFormat::Zip)
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Html => "text/html",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Plaintext => "text/plain",
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Zip => "application/zip",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Plaintext => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Zip => "zip",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(ExportFormat::Html),
            "pdf" => Ok(ExportFormat::Pdf),
            "plaintext" | "text" | "txt" => Ok(ExportFormat::Plaintext),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "zip" => Ok(ExportFormat::Zip),
            other => Err(ValidationError::InvalidExportFormat(other.to_string())),
        }
    }
}

/// Where to fetch a binary export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportDescriptor {
    pub format: ExportFormat,
    pub download_url: String,
    pub filename: String,
    pub content_type: &'static str,
    pub note: String,
}

impl ExportDescriptor {
    pub fn new(format: ExportFormat, entity_url: &str, file_stem: &str) -> Self {
        Self {
            format,
            download_url: urls::export_url(entity_url, format.as_str()),
            filename: format!("{}.{}", file_stem, format.extension()),
            content_type: format.content_type(),
            note: format!(
                "{} exports are binary; open the download URL in a browser signed in to BookStack.",
                format.as_str().to_ascii_uppercase()
            ),
        }
    }
}

/// Result of an export operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutput {
    Text { format: ExportFormat, content: String },
    Download(ExportDescriptor),
}

impl ExportOutput {
    /// Wraps a text export, rejecting an empty body.
    pub fn text(format: ExportFormat, entity: &str, content: String) -> Result<Self, AppError> {
        if content.is_empty() {
            return Err(AppError::EmptyExport {
                entity: entity.to_string(),
                format: format.to_string(),
            });
        }
        Ok(ExportOutput::Text { format, content })
    }
}
