//! Text sanitization for the Latin-1 document encoder.
//!
//! Catalog text (consequences, solutions, units) routinely carries
//! typographic characters the document encoder cannot represent. The
//! substitution map covers the common ones; anything left over becomes a
//! placeholder instead of an error, so document generation never fails for
//! character content.

/// Unicode → ASCII-safe substitutions, applied before encoding.
pub const UNICODE_MAP: &[(char, &str)] = &[
    ('\u{2014}', "--"),   // em dash
    ('\u{2013}', "-"),    // en dash
    ('\u{2018}', "'"),    // left single quote
    ('\u{2019}', "'"),    // right single quote, apostrophe
    ('\u{201C}', "\""),   // left double quote
    ('\u{201D}', "\""),   // right double quote
    ('\u{2026}', "..."),  // ellipsis
    ('\u{00B0}', " deg"), // degree sign
    ('\u{00B5}', "u"),    // micro sign, as in uS/cm
    ('\u{2265}', ">="),   // greater or equal
    ('\u{2264}', "<="),   // less or equal
    ('\u{00D7}', "x"),    // multiplication sign
    ('\u{00B1}', "+/-"),  // plus-minus
    ('\u{00AE}', "(R)"),  // registered
    ('\u{2122}', "(TM)"), // trademark
];

/// Replace known problematic characters with their ASCII equivalents.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match UNICODE_MAP.iter().find(|(c, _)| *c == ch) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(ch),
        }
    }
    out
}

/// Encode text as Latin-1 bytes, replacing any character outside the
/// Latin-1 range with `?` rather than failing.
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| {
            let code = ch as u32;
            if code < 256 {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_every_mapped_character() {
        for (ch, replacement) in UNICODE_MAP {
            let text = format!("a{ch}b");
            let sanitized = sanitize(&text);
            assert_eq!(sanitized, format!("a{replacement}b"));
            assert!(!sanitized.contains(*ch));
        }
    }

    #[test]
    fn plain_ascii_is_untouched() {
        let text = "Lead 0.02 mg/L (Limit: Max 0.01)";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn encode_passes_latin1_through() {
        // é (0xE9) is Latin-1 representable and must survive.
        let bytes = encode_latin1("caf\u{00E9}");
        assert_eq!(bytes, vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn encode_replaces_unmapped_characters() {
        let bytes = encode_latin1("a\u{4E2D}b");
        assert_eq!(bytes, vec![b'a', b'?', b'b']);
    }

    #[test]
    fn typical_catalog_text_survives() {
        let text = "Conductivity \u{2265}1500 \u{00B5}S/cm at 25\u{00B0}C \u{2014} retest";
        let sanitized = sanitize(text);
        assert_eq!(sanitized, "Conductivity >=1500 uS/cm at 25 degC -- retest");
        // Everything in the sanitized form is ASCII, so encoding is lossless.
        assert_eq!(encode_latin1(&sanitized), sanitized.as_bytes());
    }
}
