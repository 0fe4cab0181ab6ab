//! Pipeline orchestration
//!
//! Coordinates playlist loading, key annotation, sequencing, statistics and
//! export. The within-bucket sort runs on the global rayon pool.

use crate::config::Settings;
use crate::error::{MixorderError, Result};
use crate::export;
use crate::input;
use crate::key;
use crate::sequencing::{self, TempoBucket};
use crate::types::{AnnotatedTrack, SortReport};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Pipeline result summary
#[derive(Debug)]
pub struct PipelineResult {
    pub total_tracks: usize,
    pub report: SortReport,
    /// Tracks in mix order
    pub sorted: Vec<AnnotatedTrack>,
    /// Where the sorted playlist was written (None for dry runs and empty input)
    pub output_path: Option<PathBuf>,
}

/// Run the full sorting pipeline
pub fn run(settings: &Settings) -> Result<PipelineResult> {
    let pipeline_start = Instant::now();

    // Reject bad configuration before touching any data
    settings.validate()?;
    configure_thread_pool(settings.threads)?;

    // Phase 1: Load
    let entries = input::load_playlist(&settings.input)?;
    input::duplicate_ids(&entries);

    if entries.is_empty() {
        info!("Playlist is empty, nothing to sort");
        return Ok(PipelineResult {
            total_tracks: 0,
            report: SortReport::default(),
            sorted: Vec::new(),
            output_path: None,
        });
    }

    // Phase 2: Annotate
    let annotated = key::annotate(entries);
    let unknown_keys = annotated.iter().filter(|t| t.wheel.is_none()).count();
    if unknown_keys > 0 {
        warn!(
            "{} of {} tracks have no usable key and will score lowest",
            unknown_keys,
            annotated.len()
        );
    }

    // Phase 3: Sort
    let sort_start = Instant::now();
    let buckets = sequencing::plan_buckets(&annotated, &settings.sort)?;
    if settings.dry_run {
        print_bucket_plan(&buckets);
    }
    let sorted = sequencing::chain_buckets(buckets);
    let report = sequencing::calculate_report(&annotated, &sorted);
    info!(
        "Sorted {} tracks in {:.3}s ({}% harmonic transitions)",
        sorted.len(),
        sort_start.elapsed().as_secs_f64(),
        report.harmonic_score_percent
    );

    // Phase 4: Export
    let output_path = if settings.dry_run {
        print_report(&report);
        None
    } else {
        let path = export_results(&sorted, &report, settings)?;
        Some(path)
    };

    info!(
        "Total pipeline time: {:.2}s",
        pipeline_start.elapsed().as_secs_f64()
    );

    Ok(PipelineResult {
        total_tracks: sorted.len(),
        report,
        sorted,
        output_path,
    })
}

/// Configure the global rayon thread pool
fn configure_thread_pool(num_threads: usize) -> Result<()> {
    match rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
    {
        Ok(()) => {
            debug!("Configured thread pool with {} threads", num_threads);
        }
        Err(e) => {
            // Already initialized (e.g., by an earlier run in the same process)
            if e.to_string().contains("already been initialized") {
                debug!("Thread pool already initialized, using existing pool");
            } else {
                return Err(MixorderError::ConfigError(format!(
                    "Failed to configure thread pool: {}",
                    e
                )));
            }
        }
    }
    Ok(())
}

fn export_results(
    sorted: &[AnnotatedTrack],
    report: &SortReport,
    settings: &Settings,
) -> Result<PathBuf> {
    if !settings.output.exists() {
        std::fs::create_dir_all(&settings.output)
            .map_err(|e| MixorderError::output_error(&settings.output, e))?;
    }

    let path = settings.output_file();
    export::write_json(sorted, report, &settings.sort, &path, settings.force)?;
    Ok(path)
}

/// Dry run mode - show how tracks fall into buckets, before rotation
fn print_bucket_plan(buckets: &[TempoBucket]) {
    println!();
    println!("=== DRY RUN MODE ===");
    println!();

    for bucket in buckets {
        println!("{:>6.1} BPM ({} tracks)", bucket.floor, bucket.len());
        for track in &bucket.tracks {
            let label = track
                .track
                .metadata
                .title
                .as_deref()
                .unwrap_or(track.id());
            println!(
                "  {:<4} {:>6.1}  {}",
                key::to_display_string(track.wheel).unwrap_or_else(|| "-".to_string()),
                track.tempo(),
                label
            );
        }
        println!();
    }
}

fn print_report(report: &SortReport) {
    println!("─────────────────────────────────────────");
    println!();
    println!(
        "Would write {} tracks: {}/{} good transitions ({}%), {} moved",
        report.total_tracks,
        report.good_transitions,
        report.total_transitions,
        report.harmonic_score_percent,
        report.moved_tracks
    );
    println!();
    println!("Run without --dry-run to write the sorted playlist.");
}
