//! Source unit loading.
//!
//! A [`SourceUnit`] is the raw input to the analysis engine: the source
//! text plus an optional on-disk path. The path is only required when the
//! lint adapter needs to hand the file to an external tool.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Rejections raised before the engine runs at all.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file does not carry a `.py` extension.
    #[error("unsupported file type {0:?}, expected a .py file")]
    UnsupportedType(PathBuf),
    /// The file could not be read from disk.
    #[error("cannot read {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Raw source text plus the optional path it was read from.
///
/// Immutable once loaded; every analysis run owns its own unit.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub text: String,
    pub path: Option<PathBuf>,
}

impl SourceUnit {
    /// Wrap in-memory source text with no backing file.
    pub fn from_source(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            path: None,
        }
    }

    /// Read a `.py` file from disk.
    ///
    /// Decodes as UTF-8, falling back to Windows-1252 for legacy files.
    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "py" {
            return Err(InputError::UnsupportedType(path.to_path_buf()));
        }

        let bytes = std::fs::read(path).map_err(|source| InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => decode_windows_1252(err.as_bytes()),
        };

        Ok(Self {
            text,
            path: Some(path.to_path_buf()),
        })
    }

    /// Total line count of the raw text, computed even when parsing fails.
    pub fn total_lines(&self) -> usize {
        self.text.lines().count()
    }
}

/// Windows-1252 codepoints for bytes 0x80..=0x9F; all other bytes map
/// straight to the same Unicode scalar.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

fn decode_windows_1252(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
            _ => b as char,
        })
        .collect()
}
