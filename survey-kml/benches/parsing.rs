//! Benchmarks pour le parsing et l'extraction KML

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::path::Path;

fn find_fixtures() -> Vec<std::path::PathBuf> {
    let pattern = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/plot_*.kml");
    glob::glob(&pattern.to_string_lossy())
        .map(|paths| paths.filter_map(|p| p.ok()).collect())
        .unwrap_or_default()
}

/// Document synthétique avec un anneau de `vertices` sommets
fn synthetic_document(vertices: usize) -> String {
    let coords: Vec<String> = (0..vertices)
        .map(|i| {
            let angle = i as f64 / vertices as f64 * std::f64::consts::TAU;
            format!("{:.7},{:.7},0", 33.0 + angle.cos() * 0.001, 34.7 + angle.sin() * 0.001)
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2"><Document><name>0/1</name><Folder><Placemark>
<description><![CDATA[Δήμος: <b>Λεμεσός</b><hr>Εμβαδό: <b>1500 μ²</b><hr>Ορόφοι: <b>2,</b>]]></description>
<Polygon><outerBoundaryIs><LinearRing><coordinates>{}</coordinates></LinearRing></outerBoundaryIs></Polygon>
</Placemark></Folder></Document></kml>"#,
        coords.join(" ")
    )
}

fn bench_fixtures(c: &mut Criterion) {
    let fixtures = find_fixtures();
    if fixtures.is_empty() {
        eprintln!("No fixtures found, skipping benchmark");
        return;
    }

    let mut group = c.benchmark_group("extract_fixture");
    for path in &fixtures {
        let data = std::fs::read(path).unwrap();
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(path.file_name().unwrap().to_string_lossy()),
            &data,
            |b, data| {
                b.iter(|| {
                    let result = survey_kml::extract_document(black_box(data)).unwrap();
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_ring_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_ring_size");

    for vertices in [4usize, 64, 1024] {
        let doc = synthetic_document(vertices);
        group.throughput(Throughput::Elements(vertices as u64));
        group.bench_with_input(BenchmarkId::from_parameter(vertices), &doc, |b, doc| {
            b.iter(|| {
                let extraction = survey_kml::extract_document(black_box(doc.as_bytes())).unwrap();
                let projected = survey_kml::project(&extraction.ring);
                black_box((extraction, projected))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fixtures, bench_ring_size);
criterion_main!(benches);
