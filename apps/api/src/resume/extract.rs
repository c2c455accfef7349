//! Text extraction from uploaded documents, and input sanitization.

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static XML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static PARAGRAPH_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").unwrap());
static TAB_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:tab\s*/>").unwrap());

const DOCX_BODY: &str = "word/document.xml";
/// Share of suspicious characters above which decoded text is treated as binary.
const MAX_BINARY_RATIO: f64 = 0.1;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("could not read DOCX: {0}")]
    Docx(String),

    #[error("unsupported binary file")]
    Binary,

    #[error("no text found in document")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    /// Sniffs the kind from magic bytes, then the file name and content type.
    pub fn detect(file_name: &str, content_type: Option<&str>, bytes: &[u8]) -> Self {
        let name = file_name.to_lowercase();
        let ctype = content_type.unwrap_or_default().to_lowercase();

        if bytes.starts_with(b"%PDF") || name.ends_with(".pdf") || ctype == "application/pdf" {
            return DocumentKind::Pdf;
        }
        let is_zip = bytes.starts_with(b"PK\x03\x04");
        if is_zip && (name.ends_with(".docx") || ctype.contains("wordprocessingml")) {
            return DocumentKind::Docx;
        }
        DocumentKind::Text
    }
}

/// Extracts and sanitizes the text of an uploaded document.
pub fn extract_text(
    file_name: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<String, ExtractError> {
    let raw = match DocumentKind::detect(file_name, content_type, bytes) {
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?
        }
        DocumentKind::Docx => docx_text(bytes)?,
        DocumentKind::Text => plain_text(bytes)?,
    };

    let text = sanitize(&raw);
    if text.is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(text)
}

fn docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut entry = archive
        .by_name(DOCX_BODY)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    Ok(document_xml_to_text(&xml))
}

/// One line per paragraph; tags dropped, entities decoded.
fn document_xml_to_text(xml: &str) -> String {
    let with_breaks = PARAGRAPH_END_RE.replace_all(xml, "\n");
    let with_tabs = TAB_RE.replace_all(&with_breaks, "\t");
    let stripped = XML_TAG_RE.replace_all(&with_tabs, "");
    stripped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn plain_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = String::from_utf8_lossy(bytes);
    let total = text.chars().count();
    if total == 0 {
        return Ok(String::new());
    }
    let suspicious = text
        .chars()
        .filter(|&c| c == char::REPLACEMENT_CHARACTER || (c.is_control() && !c.is_whitespace()))
        .count();
    if suspicious as f64 / total as f64 > MAX_BINARY_RATIO {
        return Err(ExtractError::Binary);
    }
    Ok(text.into_owned())
}

/// Drops control characters (newlines and tabs excepted), normalizes line
/// endings, collapses horizontal whitespace and runs of blank lines, and trims.
/// Line structure survives; the heuristic parser depends on it.
pub fn sanitize(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let cleaned: String = normalized
        .chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect();

    let mut out: Vec<String> = Vec::new();
    for line in cleaned.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() && out.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}
