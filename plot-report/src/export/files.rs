//! Écriture des fichiers d'un bundle dans un dossier de sortie

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::bundle::ReportBundle;

use super::geojson::export_to_geojson;

/// Fichiers produits pour un bundle
#[derive(Debug, Clone)]
pub struct WrittenFiles {
    pub json: PathBuf,
    pub geojson: PathBuf,
    pub png: Option<PathBuf>,
}

/// Écrit `<stem>.json`, `<stem>.geojson` et `<stem>.png` si une image existe
pub fn write_bundle(bundle: &ReportBundle, output: &Path, stem: &str) -> Result<WrittenFiles> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("Cannot create {}", output.display()))?;

    let json = output.join(format!("{}.json", stem));
    std::fs::write(&json, bundle.to_json()?)
        .with_context(|| format!("Cannot write {}", json.display()))?;

    let geojson = output.join(format!("{}.geojson", stem));
    export_to_geojson(bundle, &geojson)?;

    let png = match bundle.plot_image {
        Some(ref image) => {
            let path = output.join(format!("{}.png", stem));
            std::fs::write(&path, image.as_png())
                .with_context(|| format!("Cannot write {}", path.display()))?;
            Some(path)
        }
        None => None,
    };

    debug!(stem = stem, image = png.is_some(), "Bundle written");

    Ok(WrittenFiles { json, geojson, png })
}
