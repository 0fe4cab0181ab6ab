//! CLI argument parsing and configuration

use clap::Parser;
use std::path::PathBuf;

/// mixorder - Reorder playlists for harmonic DJ mixing
///
/// Groups tracks into tempo buckets, orders each bucket around the key wheel,
/// and rotates buckets so that every tempo step lands on a compatible key.
#[derive(Parser, Debug)]
#[command(name = "mixorder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Playlist JSON file (tracks with tempo/key/mode features)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output directory for the sorted playlist JSON
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Width of each tempo bucket in BPM
    #[arg(short, long, value_name = "BPM", default_value_t = 5.0)]
    pub bucket_size: f64,

    /// Order from fastest to slowest instead of slowest to fastest
    #[arg(long, default_value = "false")]
    pub descending: bool,

    /// Number of worker threads (defaults to CPU count - 1)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Overwrite an existing sorted playlist in the output directory
    #[arg(long, default_value = "false")]
    pub force: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Dry run - print the bucket plan and report without writing anything
    #[arg(long, default_value = "false")]
    pub dry_run: bool,
}

impl Cli {
    /// Log filter directive for the verbosity flags
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mixorder", "-i", "in.json", "-o", "out"]).unwrap();
        assert_eq!(cli.bucket_size, 5.0);
        assert!(!cli.descending);
        assert!(!cli.force);
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "mixorder",
            "-i",
            "in.json",
            "-o",
            "out",
            "--bucket-size",
            "2.5",
            "--descending",
            "-vv",
            "-j",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.bucket_size, 2.5);
        assert!(cli.descending);
        assert_eq!(cli.threads, Some(3));
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let cli = Cli::try_parse_from(["mixorder", "-i", "a", "-o", "b", "-vvv", "-q"]).unwrap();
        assert_eq!(cli.log_filter(), "error");
    }

    #[test]
    fn test_input_required() {
        assert!(Cli::try_parse_from(["mixorder", "-o", "out"]).is_err());
    }
}
