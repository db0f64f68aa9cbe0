//! Media Wall - Entry Point

use clap::Parser;
use mediawall::config::CliOverrides;
use mediawall::layout::ColumnPicker;
use mediawall::view::CellMetrics;
use std::path::PathBuf;
use tracing::info;

/// Media Wall - masonry wall for a stream of content cards
#[derive(Parser, Debug)]
#[command(name = "mediawall")]
#[command(version)]
#[command(about = "Lay out a JSONL stream of content cards as a responsive multi-column wall")]
pub struct Args {
    /// Path to JSONL content file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Fixed number of columns (auto-fits to the terminal width if not set)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub columns: Option<u64>,

    /// Minimum card width in pixels when auto-fitting
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub min_content_width: Option<u32>,

    /// Column picking strategy: round-robin or shortest-column
    #[arg(short, long)]
    pub picker: Option<ColumnPicker>,

    /// Cards shown before "show more"
    #[arg(short, long)]
    pub initial: Option<usize>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the laid-out wall once and exit instead of starting the TUI
    #[arg(long)]
    pub snapshot: bool,

    /// Snapshot width in terminal columns
    #[arg(long, default_value = "120")]
    pub width: u16,

    /// Snapshot height in terminal rows
    #[arg(long, default_value = "40")]
    pub height: u16,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            columns: self.columns.map(|c| c as usize),
            min_content_width: self.min_content_width,
            picker: self.picker,
            initial: self.initial,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = mediawall::config::resolve(args.config.clone(), args.overrides())?;

    mediawall::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let input_source = mediawall::source::detect_input_source(args.file.clone())?;

    if args.snapshot {
        let component = mediawall::view::build_component(&config)?;
        let metrics = CellMetrics {
            width_px: config.cell_width_px,
            height_px: config.cell_height_px,
        };
        let text = mediawall::view::render_snapshot(
            input_source,
            component,
            metrics,
            args.width,
            args.height,
        )?;
        println!("{text}");
        return Ok(());
    }

    mediawall::view::run_with_source(input_source, &config)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["mediawall", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["mediawall", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["mediawall"]);
        assert_eq!(args.file, None);
        assert_eq!(args.columns, None);
        assert_eq!(args.picker, None);
        assert!(!args.snapshot);
        assert_eq!(args.width, 120);
        assert_eq!(args.height, 40);
        assert_eq!(args.overrides(), CliOverrides::default());
    }

    #[test]
    fn test_layout_flags_become_overrides() {
        let args = Args::parse_from([
            "mediawall",
            "feed.jsonl",
            "-c",
            "3",
            "--min-content-width",
            "250",
            "--picker",
            "shortest-column",
            "-i",
            "12",
        ]);
        assert_eq!(args.file, Some(PathBuf::from("feed.jsonl")));
        assert_eq!(
            args.overrides(),
            CliOverrides {
                columns: Some(3),
                min_content_width: Some(250),
                picker: Some(ColumnPicker::ShortestColumn),
                initial: Some(12),
            }
        );
    }

    #[test]
    fn test_picker_accepts_camel_case() {
        let args = Args::parse_from(["mediawall", "--picker", "roundRobin"]);
        assert_eq!(args.picker, Some(ColumnPicker::RoundRobin));
    }

    #[test]
    fn test_invalid_values_reject() {
        for argv in [
            &["mediawall", "--columns", "0"][..],
            &["mediawall", "--min-content-width", "0"][..],
            &["mediawall", "--picker", "tallest"][..],
        ] {
            assert!(Args::try_parse_from(argv).is_err(), "{argv:?}");
        }
    }

    #[test]
    fn test_snapshot_size() {
        let args = Args::parse_from(["mediawall", "--snapshot", "--width", "80", "--height", "20"]);
        assert!(args.snapshot);
        assert_eq!((args.width, args.height), (80, 20));
    }
}
