//! Text decoding for downloaded reports
//!
//! The portal serves reports in EUC-KR (code page 949), never UTF-8.

use encoding_rs::{EUC_KR, UTF_8};

use crate::error::ParseError;

/// Byte-order mark written in front of UTF-8 CSV output
pub const UTF8_BOM: &str = "\u{feff}";

/// Decode a portal report. Malformed sequences are an error, not replaced.
pub fn decode_report(bytes: &[u8]) -> Result<String, ParseError> {
    EUC_KR
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or(ParseError::Decode)
}

/// Encoding a CSV file was read with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    EucKr,
}

impl SourceEncoding {
    pub fn label(&self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::EucKr => "euc-kr",
        }
    }
}

/// Decode a CSV of unknown origin: UTF-8 first (BOM stripped), then EUC-KR.
pub fn decode_any(bytes: &[u8]) -> Result<(String, SourceEncoding), ParseError> {
    let without_bom = bytes.strip_prefix(UTF8_BOM.as_bytes()).unwrap_or(bytes);
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(without_bom) {
        return Ok((text.into_owned(), SourceEncoding::Utf8));
    }
    decode_report(bytes).map(|text| (text, SourceEncoding::EucKr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_euc_kr() {
        let (bytes, _, _) = EUC_KR.encode("성명,건강\n홍길동,100");
        assert_eq!(decode_report(&bytes).unwrap(), "성명,건강\n홍길동,100");
    }

    #[test]
    fn test_rejects_malformed_bytes() {
        assert_eq!(decode_report(&[0x41, 0xff, 0xff]), Err(ParseError::Decode));
    }

    #[test]
    fn test_decode_any_prefers_utf8() {
        let input = format!("{}이름,금액", UTF8_BOM);
        let (text, encoding) = decode_any(input.as_bytes()).unwrap();
        assert_eq!(text, "이름,금액");
        assert_eq!(encoding, SourceEncoding::Utf8);
    }

    #[test]
    fn test_decode_any_falls_back_to_euc_kr() {
        let (bytes, _, _) = EUC_KR.encode("이름,금액");
        let (text, encoding) = decode_any(&bytes).unwrap();
        assert_eq!(text, "이름,금액");
        assert_eq!(encoding, SourceEncoding::EucKr);
    }
}
