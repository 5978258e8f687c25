//! Character sets understood by the line reader and BOM detection
//!
//! Only the encodings WebVTT files are realistically stored in are supported:
//! US-ASCII, UTF-8 and the three UTF-16 flavours. A byte-order mark at the
//! read position overrides the requested Unicode charset.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Character set used to decode a line of bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Charset {
    /// 7-bit ASCII; bytes above 0x7F decode to U+FFFD and BOMs are not skipped
    UsAscii,
    /// UTF-8 (default for WebVTT)
    #[default]
    Utf8,
    /// UTF-16 with unknown byte order, read big-endian unless a BOM says otherwise
    Utf16,
    /// UTF-16 big-endian
    Utf16Be,
    /// UTF-16 little-endian
    Utf16Le,
}

impl Charset {
    /// Width of one code unit in bytes
    #[must_use]
    pub const fn code_unit_len(self) -> usize {
        match self {
            Self::UsAscii | Self::Utf8 => 1,
            Self::Utf16 | Self::Utf16Be | Self::Utf16Le => 2,
        }
    }

    /// Canonical charset name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UsAscii => "US-ASCII",
            Self::Utf8 => "UTF-8",
            Self::Utf16 => "UTF-16",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
        }
    }

    /// Look up a charset by (case-insensitive) name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [
            Self::UsAscii,
            Self::Utf8,
            Self::Utf16,
            Self::Utf16Be,
            Self::Utf16Le,
        ]
        .into_iter()
        .find(|charset| charset.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Decode one code unit at `bytes[0..code_unit_len]`, if complete
    pub(crate) fn code_unit(self, bytes: &[u8]) -> Option<u16> {
        match self {
            Self::UsAscii | Self::Utf8 => bytes.first().map(|&b| u16::from(b)),
            Self::Utf16 | Self::Utf16Be => match bytes {
                [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
                _ => None,
            },
            Self::Utf16Le => match bytes {
                [lo, hi, ..] => Some(u16::from_le_bytes([*lo, *hi])),
                _ => None,
            },
        }
    }

    /// Decode a complete line, replacing invalid sequences with U+FFFD
    pub(crate) fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::UsAscii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { char::from(b) } else { '\u{FFFD}' })
                .collect(),
            Self::Utf16 | Self::Utf16Be | Self::Utf16Le => {
                let units = bytes
                    .chunks(2)
                    .map(|chunk| self.code_unit(chunk).unwrap_or(0xFFFD));
                char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect()
            }
        }
    }
}

/// Byte Order Mark signatures recognised at the read position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomType {
    /// UTF-8 BOM (EF BB BF)
    Utf8,
    /// UTF-16 Big Endian (FE FF)
    Utf16Be,
    /// UTF-16 Little Endian (FF FE)
    Utf16Le,
}

impl BomType {
    /// Get byte signature for this BOM type
    #[must_use]
    pub const fn signature(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[0xEF, 0xBB, 0xBF],
            Self::Utf16Be => &[0xFE, 0xFF],
            Self::Utf16Le => &[0xFF, 0xFE],
        }
    }

    /// Charset this BOM announces
    #[must_use]
    pub const fn charset(self) -> Charset {
        match self {
            Self::Utf8 => Charset::Utf8,
            Self::Utf16Be => Charset::Utf16Be,
            Self::Utf16Le => Charset::Utf16Le,
        }
    }
}

/// Detect BOM type from byte sequence
///
/// Returns None if no BOM is detected.
#[must_use]
pub fn detect_bom(bytes: &[u8]) -> Option<BomType> {
    [BomType::Utf8, BomType::Utf16Be, BomType::Utf16Le]
        .into_iter()
        .find(|bom| bytes.starts_with(bom.signature()))
}
