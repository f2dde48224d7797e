mod records;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use line_diff::{Algorithm, CompareConfig, DEFAULT_CUTOFF};
use log::{debug, info};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::records::{load_lines, load_records, nth_record, Record};
use crate::render::{render, Header, OutputFormat};

/// Side-by-side comparison of ground truth and candidate text
#[derive(Debug, Parser)]
#[command(name = "truthdiff", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Diff algorithm for lines and characters
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Myers, global = true)]
    algorithm: AlgorithmArg,

    /// Minimum similarity (0.0 to 1.0) for two lines to be shown as one changed line
    #[arg(long, default_value_t = DEFAULT_CUTOFF, value_parser = parse_cutoff, global = true)]
    cutoff: f32,

    /// Stop searching for a minimal line diff after this many milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,
}

fn parse_cutoff(value: &str) -> Result<f32, String> {
    let cutoff: f32 = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(format!("`{}` is not between 0.0 and 1.0", value));
    }
    Ok(cutoff)
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare records from a JSON record file
    Records {
        /// Path to the record file
        path: PathBuf,

        /// Record to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        question: usize,

        /// Show every record
        #[arg(long, conflicts_with = "question")]
        all: bool,
    },

    /// Compare two text files line by line
    Files { left: PathBuf, right: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Myers,
    Patience,
    Lcs,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Myers => Algorithm::Myers,
            AlgorithmArg::Patience => Algorithm::Patience,
            AlgorithmArg::Lcs => Algorithm::Lcs,
        }
    }
}

impl Cli {
    fn config(&self) -> CompareConfig {
        let config = CompareConfig::default()
            .algorithm(self.algorithm.into())
            .cutoff(self.cutoff)
            .markers(self.format.markers());

        match self.timeout_ms {
            Some(ms) => config.timeout(Duration::from_millis(ms)),
            None => config,
        }
    }
}

fn record_header(record: &Record, position: usize, total: usize) -> Header {
    Header {
        title: format!("Question {}/{} - {}", position, total, record.question_id),
        left_heading: "Ground truth".to_string(),
        right_heading: "Question base".to_string(),
        left_note: Some(record.question_id.clone()),
        right_note: record.ler_base.map(|ler| format!("LER: {}", ler)),
        image: record.img_link.clone(),
    }
}

fn render_record(
    config: &CompareConfig,
    format: OutputFormat,
    record: &Record,
    position: usize,
    total: usize,
) -> Result<String> {
    render(
        config,
        format,
        &record_header(record, position, total),
        &record.ground_truth,
        &record.question_base,
    )
    .with_context(|| format!("Failed to compare record {}", record.question_id))
}

fn run_records(cli: &Cli, path: &Path, question: usize, all: bool) -> Result<()> {
    let config = cli.config();
    let records = load_records(path)?;
    let total = records.len();

    if all {
        info!("Comparing all {} records", total);
        let outputs = records
            .par_iter()
            .enumerate()
            .map(|(index, record)| render_record(&config, cli.format, record, index + 1, total))
            .collect::<Result<Vec<_>>>()?;

        for output in outputs {
            println!("{}", output);
        }
        return Ok(());
    }

    let record = nth_record(&records, question)?;
    debug!("Selected record {} ({})", question, record.question_id);

    println!("{}", render_record(&config, cli.format, record, question, total)?);
    Ok(())
}

fn run_files(cli: &Cli, left: &Path, right: &Path) -> Result<()> {
    let config = cli.config();
    let left_lines = load_lines(left)?;
    let right_lines = load_lines(right)?;
    debug!(
        "Loaded {} left and {} right lines",
        left_lines.len(),
        right_lines.len()
    );

    let header = Header {
        title: format!("{} vs {}", left.display(), right.display()),
        left_heading: left.display().to_string(),
        right_heading: right.display().to_string(),
        ..Header::default()
    };

    println!(
        "{}",
        render(&config, cli.format, &header, &left_lines, &right_lines)?
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    debug!("{:?}", cli);

    match &cli.command {
        Command::Records {
            path,
            question,
            all,
        } => run_records(&cli, path, *question, *all),
        Command::Files { left, right } => run_files(&cli, left, right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "truthdiff",
            "records",
            "records.json",
            "--question",
            "3",
            "--format",
            "markdown",
            "--algorithm",
            "patience",
            "--cutoff",
            "0.6",
        ]);

        assert_eq!(cli.format, OutputFormat::Markdown);
        assert_eq!(cli.algorithm, AlgorithmArg::Patience);
        assert_eq!(cli.cutoff, 0.6);
        match cli.command {
            Command::Records { question, all, .. } => {
                assert_eq!(question, 3);
                assert!(!all);
            }
            Command::Files { .. } => panic!("expected records command"),
        }

        let differ = cli.config().differ();
        assert_eq!(differ.algorithm(), Algorithm::Patience);
        assert_eq!(differ.timeout(), None);
    }

    #[test]
    fn test_all_conflicts_with_question() {
        let result = Cli::try_parse_from([
            "truthdiff",
            "records",
            "records.json",
            "--all",
            "--question",
            "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_header() {
        let record = Record {
            question_id: "q-7".to_string(),
            ground_truth: vec![],
            question_base: vec![],
            ler_base: Some(0.5),
            img_link: None,
        };

        let header = record_header(&record, 2, 9);
        assert_eq!(header.title, "Question 2/9 - q-7");
        assert_eq!(header.right_note.as_deref(), Some("LER: 0.5"));
    }

    #[test]
    fn test_cutoff_must_be_a_ratio() {
        for bad in ["NaN", "inf", "-0.1", "1.5", "high"] {
            let result = Cli::try_parse_from(["truthdiff", "--cutoff", bad, "files", "a", "b"]);
            assert!(result.is_err(), "accepted --cutoff {}", bad);
        }

        let cli = Cli::parse_from(["truthdiff", "--cutoff", "1", "files", "a", "b"]);
        assert_eq!(cli.config().differ().cutoff(), 1.0);
    }

    #[test]
    fn test_render_record() {
        let record = Record {
            question_id: "q-1".to_string(),
            ground_truth: vec!["same".to_string(), "gone".to_string()],
            question_base: vec!["same".to_string()],
            ler_base: None,
            img_link: None,
        };

        let out = render_record(&CompareConfig::default(), OutputFormat::Ndiff, &record, 1, 1).unwrap();
        assert_eq!(out, "=== Question 1/1 - q-1 ===\n  same\n- gone\n");
    }
}
