//! Extraction des paires "Libellé: <b>valeur</b>" depuis la description HTML
//!
//! L'absence d'un libellé n'est jamais une erreur : le champ vaut `""`.

use regex::Regex;
use tracing::{debug, trace, warn};

use crate::normalize::{normalize, strip_trailing_comma};
use crate::parser::{Document, Node};
use crate::types::{Field, FieldSet};

/// Libellés source à rechercher, par champ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<(Field, String)>,
}

impl Default for LabelSet {
    fn default() -> Self {
        Self {
            labels: Field::ALL
                .into_iter()
                .filter_map(|field| field.source_label().map(|l| (field, l.to_string())))
                .collect(),
        }
    }
}

impl LabelSet {
    /// Remplace (ou ajoute) le libellé d'un champ
    pub fn with_label(mut self, field: Field, label: impl Into<String>) -> Self {
        let label = label.into();
        match self.labels.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = label,
            None => self.labels.push((field, label)),
        }
        self
    }

    pub fn label(&self, field: Field) -> Option<&str> {
        self.labels
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, l)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.labels.iter().map(|(f, l)| (*f, l.as_str()))
    }
}

/// Extrait la valeur d'un libellé dans la description d'un placemark
pub fn extract(node: &Node, label: &str) -> String {
    node.child_text("description")
        .map(|html| extract_from_text(html, label))
        .unwrap_or_default()
}

/// Extrait la valeur d'un libellé dans un fragment HTML
///
/// Cherche la première occurrence (insensible à la casse) du libellé exact,
/// suivi de `:` et d'un `<b>...</b>`, et retourne le contenu trimé.
pub fn extract_from_text(html: &str, label: &str) -> String {
    let Some(regex) = label_regex(label) else {
        return String::new();
    };

    regex
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Construit la regex d'un libellé
///
/// Le libellé est échappé (`Αρ. Φ/Σχ` contient un point) et ancré sur une
/// frontière de mot pour ne pas matcher la fin d'un libellé plus long.
fn label_regex(label: &str) -> Option<Regex> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    let boundary = if label.starts_with(char::is_alphanumeric) {
        r"\b"
    } else {
        ""
    };
    let pattern = format!(r"(?i){}{}:\s*<b>(.*?)</b>", boundary, regex::escape(label));

    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(label = label, error = %e, "Invalid label pattern");
            None
        }
    }
}

/// Extrait tous les champs configurés d'un document
///
/// Les valeurs viennent du premier placemark du premier dossier ; le numéro
/// de parcelle vient du nom du `Document`. Chaque valeur est normalisée.
pub fn extract_fields(doc: &Document, labels: &LabelSet) -> FieldSet {
    let mut fields = FieldSet::new();

    if let Some(name) = doc.name() {
        fields.set(Field::PlotNumber, normalize(name));
    }

    let Some(placemark) = doc.folder_placemark() else {
        debug!("No folder placemark, attribute fields left empty");
        return fields;
    };

    for (field, label) in labels.iter() {
        let raw = extract(placemark, label);
        if raw.is_empty() {
            trace!(field = %field, label = label, "Label not found");
            continue;
        }

        let mut value = normalize(&raw);
        if field == Field::Floors {
            value = strip_trailing_comma(&value).to_string();
        }
        fields.set(field, value);
    }

    debug!(filled = fields.filled(), "Fields extracted");
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTION: &str = "Δήμος: <b>Lemesos</b><hr>Εμβαδό: <b> 1500 μ² </b><hr>\
        Αρ. Φ/Σχ: <b>54/05E1</b><hr>Ζώνη: <b>Η3</b><hr>Ζωνη Περιγραφή: <b>Οικιστική</b><hr>\
        Ορόφοι: <b>2,</b>";

    #[test]
    fn test_extract_simple_value() {
        assert_eq!(extract_from_text("Δήμος: <b>Lemesos</b>", "Δήμος"), "Lemesos");
    }

    #[test]
    fn test_extract_trims_value() {
        assert_eq!(extract_from_text(DESCRIPTION, "Εμβαδό"), "1500 μ²");
    }

    #[test]
    fn test_extract_case_insensitive() {
        assert_eq!(extract_from_text("ΔΉΜΟΣ: <b>Paphos</b>", "Δήμος"), "Paphos");
        assert_eq!(extract_from_text("δήμος: <b>Paphos</b>", "ΔΉΜΟΣ"), "Paphos");
    }

    #[test]
    fn test_extract_absent_label_returns_empty() {
        assert_eq!(extract_from_text(DESCRIPTION, "Αξία 2018"), "");
        assert_eq!(extract_from_text("", "Δήμος"), "");
        assert_eq!(extract_from_text(DESCRIPTION, ""), "");
    }

    #[test]
    fn test_extract_label_is_literal() {
        // Le '.' de "Αρ." ne doit pas matcher n'importe quel caractère
        assert_eq!(extract_from_text(DESCRIPTION, "Αρ. Φ/Σχ"), "54/05E1");
        assert_eq!(extract_from_text("ΑρX Φ/Σχ: <b>nope</b>", "Αρ. Φ/Σχ"), "");
    }

    #[test]
    fn test_extract_does_not_cross_similar_labels() {
        assert_eq!(extract_from_text(DESCRIPTION, "Ζώνη"), "Η3");
        assert_eq!(extract_from_text(DESCRIPTION, "Ζωνη Περιγραφή"), "Οικιστική");
        // Pas de match sur la fin d'un mot plus long
        assert_eq!(extract_from_text("Υποζώνη: <b>A</b>", "Ζώνη"), "");
    }

    #[test]
    fn test_extract_first_occurrence_wins() {
        let html = "Δήμος: <b>First</b> Δήμος: <b>Second</b>";
        assert_eq!(extract_from_text(html, "Δήμος"), "First");
    }

    #[test]
    fn test_extract_from_node_without_description() {
        let node = Node::new("Placemark", None, Vec::new());
        assert_eq!(extract(&node, "Δήμος"), "");
    }

    #[test]
    fn test_label_set_override() {
        let labels = LabelSet::default().with_label(Field::Municipality, "Municipality");
        assert_eq!(labels.label(Field::Municipality), Some("Municipality"));
        assert_eq!(labels.label(Field::Location), Some("Δήμος"));
        assert_eq!(labels.label(Field::PlotNumber), None);
    }
}
