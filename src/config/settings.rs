//! Runtime configuration settings

use crate::error::{MixorderError, Result};
use crate::export::OUTPUT_FILE_NAME;
use crate::sequencing::SortOptions;
use std::path::PathBuf;

/// Runtime settings for the sorting pipeline
#[derive(Debug, Clone)]
pub struct Settings {
    /// Playlist JSON file
    pub input: PathBuf,
    /// Output directory
    pub output: PathBuf,
    /// Bucket size and direction
    pub sort: SortOptions,
    /// Worker threads for the within-bucket sort
    pub threads: usize,
    /// Overwrite an existing output file
    pub force: bool,
    /// Dry run mode - print the plan without writing
    pub dry_run: bool,
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_cli(cli: &super::cli::Cli) -> Self {
        Self {
            input: cli.input.clone(),
            output: cli.output.clone(),
            sort: SortOptions {
                bucket_size: cli.bucket_size,
                ascending: !cli.descending,
            },
            threads: cli.threads.unwrap_or_else(default_threads),
            force: cli.force,
            dry_run: cli.dry_run,
        }
    }

    /// Check settings before any work is done
    pub fn validate(&self) -> Result<()> {
        self.sort.validate()?;
        if self.threads == 0 {
            return Err(MixorderError::ConfigError(
                "thread count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Path of the sorted playlist file
    pub fn output_file(&self) -> PathBuf {
        self.output.join(OUTPUT_FILE_NAME)
    }
}

fn default_threads() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("playlist.json"),
            output: PathBuf::from("./output"),
            sort: SortOptions::default(),
            threads: default_threads(),
            force: false,
            dry_run: false,
        }
    }
}
