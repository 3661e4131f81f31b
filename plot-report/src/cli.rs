//! Définition et implémentation des commandes CLI
//!
//! - `extract`: champs et coordonnée d'un export KML
//! - `render`: aperçu PNG du contour
//! - `export`: KML → bundles JSON/GeoJSON/PNG + rapport

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Subcommand;
use futures::stream;
use futures::StreamExt;
use survey_kml::{Field, LabelSet};
use tracing::{info, warn};

use plot_report::export::write_bundle;
use plot_report::{Config, ExportReport, ExportStatus, ReportBundle, Session};

#[derive(Subcommand)]
pub enum Commands {
    /// Print the plot fields and coordinates of a KML export
    Extract {
        /// Path to the .kml file
        #[arg(short, long)]
        path: PathBuf,

        /// Print the report bundle as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the plot boundary to a PNG image
    Render {
        /// Path to the .kml file
        #[arg(short, long)]
        path: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Export report bundles (JSON, GeoJSON, PNG) for a file or directory
    Export {
        /// Path to a .kml file or a directory
        #[arg(short, long)]
        path: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Number of files processed concurrently
        #[arg(long, alias = "threads")]
        jobs: Option<usize>,
    },
}

/// Exécute la commande extract
pub async fn cmd_extract(path: &Path, json: bool, config: &Config) -> Result<()> {
    // Pas d'image : seuls les champs sont affichés
    let bundle = load_bundle(path, config.label_set()?, false).await?;

    if json {
        println!("{}", bundle.to_json()?);
        return Ok(());
    }

    for field in Field::ALL {
        println!("{:<22}{}", format!("{}:", field.title()), bundle.field(field.name()));
    }
    println!("{:<22}{}", "Coordinates:", bundle.coordinates);
    println!(
        "{:<22}{} ({} vertices)",
        "Coordinate source:", bundle.coordinate_tier, bundle.vertex_count
    );

    Ok(())
}

/// Exécute la commande render
pub async fn cmd_render(path: &Path, output: &Path, config: &Config) -> Result<()> {
    let bundle = load_bundle(path, config.label_set()?, true).await?;

    let image = bundle.plot_image.context(
        "No plot diagram: the boundary has fewer than 3 vertices or rendering failed",
    )?;

    std::fs::write(output, image.as_png())
        .with_context(|| format!("Cannot write {}", output.display()))?;

    println!(
        "Plot diagram written to {} ({}x{})",
        output.display(),
        image.width(),
        image.height()
    );

    Ok(())
}

/// Exécute la commande export
pub async fn cmd_export(
    path: &Path,
    output: &Path,
    jobs: Option<usize>,
    config: &Config,
) -> Result<()> {
    let files = collect_kml_files(path)?;
    if files.is_empty() {
        anyhow::bail!("No KML files found in {}", path.display());
    }

    let jobs = jobs
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, |n| n.get()))
        .max(1);
    info!(files = files.len(), jobs = jobs, "Found KML files to export");

    std::fs::create_dir_all(output)?;

    let labels = config.label_set()?;
    let render = config.render_plot;
    let start = Instant::now();

    let mut report = ExportReport::new();
    let (tasks, collisions) = plan_exports(path, &files, output);
    for (name, message) in &collisions {
        warn!("Skipping {}: {}", name, message);
        report.record_failure(name, message);
    }

    let results: Vec<(String, Result<ReportBundle>)> = stream::iter(tasks)
        .map(|task| {
            let labels = labels.clone();
            async move {
                let result = process_file(task.file, task.target, labels, render).await;
                (task.name, result)
            }
        })
        .buffer_unordered(jobs)
        .collect()
        .await;

    for (name, result) in &results {
        match result {
            Ok(bundle) => report.record_bundle(name, bundle),
            Err(e) => {
                warn!("Failed to export {}: {:#}", name, e);
                report.record_failure(name, &format!("{:#}", e));
            }
        }
    }
    report.set_duration(start.elapsed());
    report.finalize();

    report.display();
    report.save_to_file(&output.join("report.json"))?;
    println!("Export complete: {}", report.summary());

    if report.status == ExportStatus::Failed {
        anyhow::bail!("All {} files failed to export", report.files_failed);
    }

    Ok(())
}

/// Emplacement des fichiers produits pour un export
#[derive(Debug, Clone, PartialEq, Eq)]
struct ExportTarget {
    dir: PathBuf,
    stem: String,
}

/// Fichier KML à exporter
#[derive(Debug)]
struct ExportTask {
    file: PathBuf,
    name: String,
    target: ExportTarget,
}

/// Cible d'un fichier : l'arborescence sous `root` est reproduite sous `output`
fn export_target(root: &Path, file: &Path, output: &Path) -> ExportTarget {
    let subdir = match file.strip_prefix(root) {
        Ok(relative) => relative.parent().map(Path::to_path_buf).unwrap_or_default(),
        Err(_) => PathBuf::new(),
    };

    ExportTarget {
        dir: output.join(subdir),
        stem: get_file_stem(file),
    }
}

/// Nom d'un fichier relatif à la racine de l'export
fn display_name(root: &Path, file: &Path) -> String {
    match file.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
        _ => file_name_of(file),
    }
}

/// Associe une cible à chaque fichier ; une cible déjà prise (même dossier,
/// même nom à la casse près) est rejetée plutôt qu'écrasée
fn plan_exports(
    root: &Path,
    files: &[PathBuf],
    output: &Path,
) -> (Vec<ExportTask>, Vec<(String, String)>) {
    let mut owners: HashMap<(PathBuf, String), String> = HashMap::new();
    let mut tasks = Vec::with_capacity(files.len());
    let mut collisions = Vec::new();

    for file in files {
        let name = display_name(root, file);
        let target = export_target(root, file, output);

        match owners.entry((target.dir.clone(), target.stem.to_lowercase())) {
            Entry::Occupied(owner) => collisions.push((
                name,
                format!("Output name '{}' already used by {}", target.stem, owner.get()),
            )),
            Entry::Vacant(slot) => {
                slot.insert(name.clone());
                tasks.push(ExportTask {
                    file: file.clone(),
                    name,
                    target,
                });
            }
        }
    }

    (tasks, collisions)
}

/// Charge un fichier dans une session neuve et prépare son bundle
async fn load_bundle(path: &Path, labels: LabelSet, render: bool) -> Result<ReportBundle> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let file_name = file_name_of(path);

    // Parsing et extraction hors du runtime async
    let mut session = tokio::task::spawn_blocking(move || -> Result<Session> {
        let mut session = Session::new(labels, render);
        session.load(&file_name, &data)?;
        Ok(session)
    })
    .await
    .context("Parse task failed")??;

    session
        .export()
        .await
        .context("No upload loaded in session")
}

/// Traite un fichier pour l'export
async fn process_file(
    path: PathBuf,
    target: ExportTarget,
    labels: LabelSet,
    render: bool,
) -> Result<ReportBundle> {
    let bundle = load_bundle(&path, labels, render).await?;

    tokio::task::spawn_blocking(move || -> Result<ReportBundle> {
        write_bundle(&bundle, &target.dir, &target.stem)?;
        Ok(bundle)
    })
    .await
    .context("Write task failed")?
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Nom de base d'un export (sans .kml)
fn get_file_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");

    let lower = name.to_ascii_lowercase();
    match lower.strip_suffix(".kml") {
        Some(stem) => name[..stem.len()].to_string(),
        None => name.to_string(),
    }
}

fn is_kml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("kml"))
}

/// Collecte récursivement les fichiers KML
fn collect_kml_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        // Un fichier explicite est toujours tenté : la session le rejettera
        files.push(path.to_path_buf());
        return Ok(files);
    }

    for entry in std::fs::read_dir(path)
        .with_context(|| format!("Cannot read directory {}", path.display()))?
    {
        let entry = entry?;
        let entry_path = entry.path();

        if entry_path.is_dir() {
            files.extend(collect_kml_files(&entry_path)?);
        } else if is_kml_path(&entry_path) {
            files.push(entry_path);
        }
    }

    files.sort();
    Ok(files)
}
