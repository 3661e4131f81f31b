//! Configuration du système

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use survey_kml::{Field, LabelSet};

/// Configuration principale
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Libellés source à substituer, par champ canonique
    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    /// Produire l'aperçu raster du polygone
    #[serde(default = "default_render_plot")]
    pub render_plot: bool,
}

fn default_render_plot() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels: BTreeMap::new(),
            render_plot: default_render_plot(),
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "cy" => Self::load_embedded(include_str!("presets/cy.json")),
            _ => anyhow::bail!("Unknown preset: {}. Use: cy", preset),
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }

    /// Preset embarqué ou chemin de fichier
    pub fn resolve(preset_or_path: &str) -> Result<Self> {
        match preset_or_path {
            "cy" => Self::from_preset(preset_or_path),
            _ => Self::load(Path::new(preset_or_path)),
        }
    }

    /// Libellés par défaut, surchargés par ceux de la configuration
    pub fn label_set(&self) -> Result<LabelSet> {
        self.labels
            .iter()
            .try_fold(LabelSet::default(), |labels, (name, label)| {
                let field: Field = name
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!("Invalid label override: {}", e))?;
                if field == Field::PlotNumber {
                    anyhow::bail!("PlotNumber is read from the document name, not a label");
                }
                if label.trim().is_empty() {
                    anyhow::bail!("Empty label for field {}", field);
                }
                Ok(labels.with_label(field, label.as_str()))
            })
    }
}
