//! Normalisation des valeurs extraites (unités locales)

/// Lettre grecque mu minuscule (U+03BC), utilisée pour "μ²" dans les exports
const GREEK_MU: char = '\u{03BC}';

/// Remplace chaque mu grec par un `m` ASCII (idempotent)
pub fn normalize(value: &str) -> String {
    value.replace(GREEK_MU, "m")
}

/// Supprime une virgule finale et les blancs qui la suivent ("2, " -> "2")
pub fn strip_trailing_comma(value: &str) -> &str {
    let trimmed = value.trim_end();
    trimmed.strip_suffix(',').unwrap_or(value)
}
