//! Détection de l'encodage déclaré dans le prologue XML

use std::borrow::Cow;

use encoding_rs::Encoding;
use memchr::memmem;

use crate::KmlError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Décode un export KML en texte UTF-8
///
/// Sans déclaration (ou avec `encoding="UTF-8"`), les octets sont validés
/// tels quels. Les encodages hérités (ex: ISO-8859-7 pour les exports grecs)
/// sont décodés avec `encoding_rs`, sans remplacement silencieux.
pub fn decode(data: &[u8]) -> Result<Cow<'_, str>, KmlError> {
    if let Some(rest) = data.strip_prefix(UTF8_BOM) {
        return validate_utf8(rest).map(Cow::Borrowed);
    }

    let Some(label) = declared_encoding(data) else {
        return validate_utf8(data).map(Cow::Borrowed);
    };

    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| KmlError::encoding(format!("unsupported encoding '{}'", label)))?;

    if encoding == encoding_rs::UTF_8 {
        return validate_utf8(data).map(Cow::Borrowed);
    }

    encoding
        .decode_without_bom_handling_and_without_replacement(data)
        .ok_or_else(|| {
            KmlError::encoding(format!("malformed byte sequence for {}", encoding.name()))
        })
}

/// Valide des octets UTF-8 (SIMD)
fn validate_utf8(data: &[u8]) -> Result<&str, KmlError> {
    simdutf8::compat::from_utf8(data).map_err(|e| {
        KmlError::encoding(format!(
            "invalid UTF-8 sequence at byte {}",
            e.valid_up_to()
        ))
    })
}

/// Extrait la valeur de `encoding="..."` du prologue `<?xml ... ?>`
fn declared_encoding(data: &[u8]) -> Option<&str> {
    if !data.starts_with(b"<?xml") {
        return None;
    }

    let end = memmem::find(data, b"?>")?;
    let prolog = &data[..end];

    let pos = memmem::find(prolog, b"encoding")?;
    let after = &prolog[pos + b"encoding".len()..];
    let eq = after.iter().position(|&b| b == b'=')?;
    let after = &after[eq + 1..];

    // Premier guillemet (simple ou double) après le '='
    let quote_pos = after.iter().position(|&b| b == b'"' || b == b'\'')?;
    let quote = after[quote_pos];
    let value = &after[quote_pos + 1..];
    let close = value.iter().position(|&b| b == quote)?;

    std::str::from_utf8(&value[..close]).ok().map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_encoding() {
        let data = br#"<?xml version="1.0" encoding="ISO-8859-7"?><kml/>"#;
        assert_eq!(declared_encoding(data), Some("ISO-8859-7"));

        let data = b"<?xml version='1.0' encoding='utf-8'?><kml/>";
        assert_eq!(declared_encoding(data), Some("utf-8"));

        let data = br#"<?xml version="1.0"?><kml encoding="x"/>"#;
        assert_eq!(declared_encoding(data), None);

        assert_eq!(declared_encoding(b"<kml/>"), None);
    }

    #[test]
    fn test_decode_utf8_default() {
        let text = decode("<kml>Δήμος</kml>".as_bytes()).unwrap();
        assert_eq!(text, "<kml>Δήμος</kml>");
    }

    #[test]
    fn test_decode_skips_bom() {
        let mut data = UTF8_BOM.to_vec();
        data.extend_from_slice(b"<kml/>");
        assert_eq!(decode(&data).unwrap(), "<kml/>");
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let data = b"<kml>\xFF\xFE</kml>";
        match decode(data) {
            Err(KmlError::Encoding(msg)) => assert!(msg.contains("byte 5")),
            other => panic!("Expected Encoding error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_iso_8859_7() {
        // "Δήμος" en ISO-8859-7
        let mut data = br#"<?xml version="1.0" encoding="ISO-8859-7"?><kml>"#.to_vec();
        data.extend_from_slice(&[0xC4, 0xDE, 0xEC, 0xEF, 0xF2]);
        data.extend_from_slice(b"</kml>");

        let text = decode(&data).unwrap();
        assert!(text.contains("Δήμος"));
    }

    #[test]
    fn test_decode_unknown_encoding() {
        let data = br#"<?xml version="1.0" encoding="X-NOPE"?><kml/>"#;
        assert!(matches!(decode(data), Err(KmlError::Encoding(_))));
    }
}
