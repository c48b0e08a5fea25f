//! Loading of showplan documents from disk

use super::error::{PlanError, PlanResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Raw showplan text together with the path it was read from
#[derive(Debug, Clone)]
pub struct PlanSource {
    path: PathBuf,
    text: String,
}

impl PlanSource {
    /// Read a `.sqlplan` / `.xml` file fully into memory
    pub fn read(path: impl AsRef<Path>) -> PlanResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(PlanError::NotFound(path));
        }

        let bytes = fs::read(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => PlanError::NotFound(path.clone()),
            _ => PlanError::Io { path: path.clone(), source },
        })?;

        tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(Self { text: decode_text(&bytes), path })
    }

    /// Wrap in-memory text; `label` is only used in messages
    pub fn from_text(label: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self { path: label.into(), text: text.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parse the text as well-formed XML
    pub fn parse(&self) -> PlanResult<roxmltree::Document<'_>> {
        roxmltree::Document::parse(&self.text)
            .map_err(|source| PlanError::Malformed { path: self.path.clone(), source })
    }
}

/// Decode file bytes to text.
///
/// SSMS saves `.sqlplan` files as UTF-16 LE with a byte order mark; plans
/// copied out of `SET SHOWPLAN_XML` output are usually UTF-8.
fn decode_text(bytes: &[u8]) -> String {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]])).collect();
    String::from_utf16_lossy(&units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file_is_not_found() {
        let err = PlanSource::read("/definitely/not/here.sqlplan").unwrap_err();
        assert!(matches!(err, PlanError::NotFound(_)));
        assert_eq!(err.kind(), "input-not-found");
    }

    #[test]
    fn test_parse_malformed_text() {
        let source = PlanSource::from_text("inline.xml", "<ShowPlanXML><RelOp></ShowPlanXML>");
        let err = source.parse().unwrap_err();
        assert!(matches!(err, PlanError::Malformed { .. }));
        assert!(err.to_string().contains("inline.xml"));
    }

    #[test]
    fn test_decode_utf16_le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<a/>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(&bytes), "<a/>");
    }

    #[test]
    fn test_decode_utf8_with_bom() {
        assert_eq!(decode_text(b"\xEF\xBB\xBF<a/>"), "<a/>");
        assert_eq!(decode_text(b"<a/>"), "<a/>");
    }
}
