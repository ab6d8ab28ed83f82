// Text encodings accepted for delimited reports.
use crate::error::{EngineError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// Windows-1252 code points for bytes 0x80..=0x9F; `None` marks bytes the
// code page leaves undefined.
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Windows1252,
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Windows1252 => "windows-1252",
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            TextEncoding::Utf8 => {
                let bytes = strip_bom(bytes);
                String::from_utf8(bytes.to_vec())
                    .map_err(|e| EngineError::EncodingError(format!("not valid utf-8: {}", e)))
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Windows1252 => bytes
                .iter()
                .enumerate()
                .map(|(pos, &b)| match b {
                    0x80..=0x9F => CP1252_HIGH[usize::from(b - 0x80)].ok_or_else(|| {
                        EngineError::EncodingError(format!(
                            "byte 0x{:02X} at offset {} is undefined in windows-1252",
                            b, pos
                        ))
                    }),
                    _ => Ok(char::from(b)),
                })
                .collect(),
        }
    }
}

pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Byte-order mark written at the start of every delimited file we create,
/// so spreadsheet tools pick UTF-8.
pub fn bom() -> &'static [u8] {
    UTF8_BOM
}
