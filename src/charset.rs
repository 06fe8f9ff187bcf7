//! Charset selection and file name decoding.
//!
//! Input tables produced on Chinese-locale systems often carry file names in
//! a legacy encoding. A [`Charset`] is resolved once from the configured name
//! and then used to turn the raw bytes of each file name field into the
//! UTF-8 bytes of the name.
//!
//! ```rust
//! use rowfetch::charset::Charset;
//!
//! let charset = Charset::resolve("GBK");
//! assert_eq!(charset, Charset::Gbk);
//! assert_eq!(charset.decode(&[0xD6, 0xD0, 0xCE, 0xC4]).unwrap(), "中文".as_bytes());
//!
//! // Unknown names fall back to no decoding: bytes pass through unchanged.
//! assert_eq!(Charset::resolve("UTF-8"), Charset::Identity);
//! assert_eq!(Charset::Identity.decode(b"a\xFF.jpg").unwrap(), b"a\xFF.jpg");
//! ```

use encoding_rs::{Encoding, GB18030, GBK};
use std::fmt;
use thiserror::Error;

/// A file name could not be decoded with the configured charset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot decode {} as {charset}", String::from_utf8_lossy(raw))]
pub struct DecodeError {
    /// The undecoded bytes, kept for diagnostics.
    pub raw: Vec<u8>,
    /// Label of the charset that rejected them.
    pub charset: &'static str,
}

/// The decoding applied to raw file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// No decoding: bytes are used as they are.
    #[default]
    Identity,
    /// GBK.
    Gbk,
    /// GB2312, decoded with the GBK tables it is a subset of.
    Gb2312,
    /// GB18030.
    Gb18030,
}

impl Charset {
    /// Map a configured charset name to a [`Charset`].
    ///
    /// Matching is case-insensitive. Unrecognized names, including the
    /// default `UTF-8`, silently resolve to [`Charset::Identity`].
    pub fn resolve(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "gbk" => Charset::Gbk,
            "gb2312" => Charset::Gb2312,
            "gb18030" => Charset::Gb18030,
            _ => Charset::Identity,
        }
    }

    /// Canonical label of the charset.
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Identity => "utf-8",
            Charset::Gbk => "gbk",
            Charset::Gb2312 => "gb2312",
            Charset::Gb18030 => "gb18030",
        }
    }

    fn encoding(&self) -> Option<&'static Encoding> {
        match self {
            Charset::Identity => None,
            Charset::Gbk | Charset::Gb2312 => Some(GBK),
            Charset::Gb18030 => Some(GB18030),
        }
    }

    /// Decode raw bytes into the bytes of the file name.
    ///
    /// [`Charset::Identity`] returns its input unchanged and never fails,
    /// even for bytes that are not valid UTF-8. Legacy charsets decode
    /// strictly to UTF-8 and reject any malformed sequence.
    pub fn decode(&self, raw: &[u8]) -> Result<Vec<u8>, DecodeError> {
        match self.encoding() {
            None => Ok(raw.to_vec()),
            Some(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(raw)
                .map(|text| text.into_owned().into_bytes())
                .ok_or_else(|| DecodeError {
                    raw: raw.to_vec(),
                    charset: self.name(),
                }),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
