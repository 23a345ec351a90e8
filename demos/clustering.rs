//! Batch and incremental k-means on a scripted sequence of "clicks".
//!
//! Usage: `cargo run --example clustering -- NUM_CLUSTERS`
//!
//! Set `RUST_LOG=kstream=debug` (or `trace`) to see engine diagnostics.

use std::process::ExitCode;

use kstream::{
    BatchKmeans, ChainingPresenter, IncrementalKmeans, LoggingPresenter, Point, PrintingPresenter,
};
use tracing_subscriber::EnvFilter;

// Pixel coordinates of three groups of clicks, interleaved the way a user
// might produce them.
const CLICKS: [(i32, i32); 12] = [
    (100, 120),
    (820, 140),
    (480, 900),
    (110, 100),
    (800, 160),
    (130, 140),
    (500, 880),
    (790, 130),
    (460, 910),
    (90, 110),
    (830, 150),
    (490, 870),
];

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map_or("clustering", String::as_str);
    let Some(k) = args.get(1).and_then(|s| s.parse::<usize>().ok()).filter(|k| *k > 0) else {
        eprintln!("USAGE: {program} NUM_CLUSTERS");
        return ExitCode::FAILURE;
    };

    let points: Vec<Point> = CLICKS.iter().copied().map(Point::from).collect();

    // --- Incremental: one click at a time ---
    println!("=== Incremental k-means (k={k}) ===");
    let presenter = ChainingPresenter::new()
        .with(PrintingPresenter::stdout())
        .with(LoggingPresenter);
    let mut engine = match IncrementalKmeans::new(k) {
        Ok(engine) => engine.with_presenter(presenter),
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    for p in &points {
        println!("--- click at {p} ({:?}) ---", engine.phase());
        if let Err(err) = engine.add_point(*p) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    // --- Batch: all clicks at once ---
    println!("\n=== Batch k-means (k={k}) ===");
    let result = BatchKmeans::new(k).and_then(|mut model| model.find_k_means(&points));
    match result {
        Ok(run) => {
            for (i, (point, label)) in points.iter().zip(&run.labels).enumerate() {
                println!("  point {i:2} {point} => cluster {label}");
            }
            for (i, centroid) in run.centroids.iter().enumerate() {
                println!("  centroid {i} {centroid}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
