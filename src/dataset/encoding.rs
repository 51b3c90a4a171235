use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, GB18030, GBK, UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text encodings tried when decoding a tabular source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceEncoding {
    Utf8,
    /// Decoded with the GB18030 decoder, so it accepts everything
    /// `Gb18030` accepts.
    Gbk,
    /// Never wins after `Gbk`; only useful configured on its own.
    Gb18030,
    /// windows-1252. Accepts any byte sequence, so a file can never fail
    /// to decode once this is in the list. Opt-in only.
    Latin1,
}

impl SourceEncoding {
    /// UTF-8 then GBK. A file neither accepts is skipped.
    pub fn default_order() -> Vec<Self> {
        vec![SourceEncoding::Utf8, SourceEncoding::Gbk]
    }

    pub fn name(&self) -> &'static str {
        self.encoding().name()
    }

    fn encoding(&self) -> &'static Encoding {
        match self {
            SourceEncoding::Utf8 => UTF_8,
            SourceEncoding::Gbk => GBK,
            SourceEncoding::Gb18030 => GB18030,
            SourceEncoding::Latin1 => WINDOWS_1252,
        }
    }

    /// Decode `bytes`, stripping a leading BOM. `None` if any byte sequence
    /// had to be replaced.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        let (text, had_errors) = self.encoding().decode_with_bom_removal(bytes);
        if had_errors {
            None
        } else {
            Some(text.into_owned())
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} could not be decoded as any of [{tried}]")]
    Encoding { path: PathBuf, tried: String },
}

#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    pub encoding: SourceEncoding,
}

/// Read `path` and decode it with the first encoding that succeeds.
pub fn read_decoded(path: &Path, encodings: &[SourceEncoding]) -> Result<DecodedText, DecodeError> {
    let bytes = fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    for encoding in encodings {
        if let Some(text) = encoding.decode(&bytes) {
            return Ok(DecodedText {
                text,
                encoding: *encoding,
            });
        }
    }

    Err(DecodeError::Encoding {
        path: path.to_path_buf(),
        tried: encodings
            .iter()
            .map(|e| e.name())
            .collect::<Vec<_>>()
            .join(", "),
    })
}
