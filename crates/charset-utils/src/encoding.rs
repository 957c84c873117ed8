//! Byte-order mark sniffing.

use encoding_rs::Encoding;

/// Detect a UTF byte-order mark at position 0 and return the encoding it
/// signals.
pub fn sniff_bom(bytes: &[u8]) -> Option<&'static Encoding> {
    Encoding::for_bom(bytes).map(|(encoding, _)| encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_bom() {
        assert_eq!(sniff_bom(b"\xEF\xBB\xBF<html>"), Some(encoding_rs::UTF_8));
        assert_eq!(sniff_bom(b"\xFF\xFE<\x00"), Some(encoding_rs::UTF_16LE));
        assert_eq!(sniff_bom(b"\xFE\xFF\x00<"), Some(encoding_rs::UTF_16BE));
    }

    #[test]
    fn test_sniff_bom_position_zero_only() {
        assert_eq!(sniff_bom(b" \xEF\xBB\xBF"), None);
        assert_eq!(sniff_bom(b""), None);
        // Truncated UTF-8 BOM
        assert_eq!(sniff_bom(b"\xEF\xBB"), None);
    }
}
