//! Parsing d'un export KML en arbre navigable
//!
//! Seule étape fatale du pipeline : le document est soit entièrement
//! parsé, soit rejeté avec une `KmlError`, jamais partiellement.

pub mod encoding;
pub mod tree;

pub use tree::{Document, Node};

use crate::KmlError;

/// Parse un export KML brut (octets) après détection de l'encodage
pub fn parse_bytes(data: &[u8]) -> Result<Document, KmlError> {
    let text = encoding::decode(data)?;
    parse_str(&text)
}

/// Parse un export KML déjà décodé
pub fn parse_str(text: &str) -> Result<Document, KmlError> {
    let xml = roxmltree::Document::parse(text)?;
    let root = xml.root_element();

    if root.tag_name().name() != "kml" {
        return Err(KmlError::missing(format!(
            "kml (found root element '{}')",
            root.tag_name().name()
        )));
    }

    let document = root
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "Document")
        .ok_or_else(|| KmlError::missing("Document"))?;

    Ok(Document::new(Node::from_xml(document)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let doc = parse_str("<kml><Document><name>0/123</name></Document></kml>").unwrap();
        assert_eq!(doc.name(), Some("0/123"));
        assert!(doc.top_placemark().is_none());
        assert!(doc.folder_placemark().is_none());
    }

    #[test]
    fn test_parse_unterminated_tag_returns_error() {
        let result = parse_str("<kml><Document><name>0/123</Document></kml>");
        assert!(matches!(result, Err(KmlError::Xml(_))));
    }

    #[test]
    fn test_parse_truncated_document_returns_error() {
        let result = parse_str("<kml><Document>");
        assert!(matches!(result, Err(KmlError::Xml(_))));
    }

    #[test]
    fn test_parse_wrong_root_returns_error() {
        match parse_str("<svg><Document/></svg>") {
            Err(KmlError::MissingElement(msg)) => assert!(msg.contains("svg")),
            other => panic!("Expected MissingElement error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_document_returns_error() {
        let result = parse_str("<kml><Folder/></kml>");
        assert!(matches!(result, Err(KmlError::MissingElement(_))));
    }

    #[test]
    fn test_parse_bytes_invalid_encoding() {
        let result = parse_bytes(b"<kml><Document><name>\xC0</name></Document></kml>");
        assert!(matches!(result, Err(KmlError::Encoding(_))));
    }
}
