use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use dotenvy::dotenv;
use lead_common::api::ScoreReport;
use lead_common::export::{write_ranked_csv, write_report_json};
use lead_common::logging::{init_tracing_subscriber, install_tracing_panic_hook};
use lead_common::normalize::{records_from_csv, records_from_json};
use lead_common::{CompanyRecord, RawScoringCriteria, Ranker, RankerConfig, ScoringCriteria};
use tracing::{error, info, warn};

mod error;

use error::CliError;

const APP_NAME: &str = "lead-score";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// `.csv` files are read as CSV, anything else as JSON
    Auto,
    Json,
    Csv,
}

impl InputFormat {
    fn resolve(self, path: &Path) -> InputFormat {
        match self {
            InputFormat::Auto => {
                let is_csv = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
                if is_csv {
                    InputFormat::Csv
                } else {
                    InputFormat::Json
                }
            }
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Parser)]
#[command(name = APP_NAME, about = "Score and rank company leads against weighted criteria")]
struct Cli {
    /// Company records: JSON array or CSV with a header row
    #[arg(long, env = "LEAD_RECORDS")]
    records: PathBuf,

    /// Criteria JSON (keyword, keywordWeight, industrial, industrialWeight, ...)
    #[arg(long, env = "LEAD_CRITERIA")]
    criteria: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "auto")]
    input_format: InputFormat,

    #[arg(long, value_enum, default_value = "json")]
    output_format: OutputFormat,

    /// Overrides minimumScore from the criteria file (0-100)
    #[arg(long)]
    min_score: Option<f64>,

    /// Maximum number of ranked companies to emit
    #[arg(long)]
    limit: Option<usize>,

    /// Pretty-print JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> ExitCode {
    dotenv().ok();
    init_tracing_subscriber(APP_NAME);
    install_tracing_panic_hook(APP_NAME);

    let cli = Cli::parse();
    match run(&cli, io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "lead scoring failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run<W: Write>(cli: &Cli, out: W) -> Result<(), CliError> {
    let criteria = load_criteria(cli.criteria.as_deref(), cli.min_score)?;
    let records = load_records(&cli.records, cli.input_format)?;
    if criteria.is_empty() {
        warn!("no active criteria; every record scores 0");
    }

    let ranker = Ranker::new(RankerConfig {
        max_results: cli.limit,
    });
    let ranked = ranker.rank(&records, &criteria);

    info!(
        records = records.len(),
        returned = ranked.len(),
        active_criteria = criteria.active().count(),
        minimum_score = criteria.minimum_score(),
        "scored company records"
    );

    match cli.output_format {
        OutputFormat::Json => {
            let report = ScoreReport::new(ranked, records.len(), criteria.minimum_score());
            write_report_json(&report, out, cli.pretty)?;
        }
        OutputFormat::Csv => write_ranked_csv(&ranked, out)?,
    }

    Ok(())
}

fn read_to_string(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_criteria(path: Option<&Path>, min_score: Option<f64>) -> Result<ScoringCriteria, CliError> {
    let mut raw = match path {
        Some(path) => serde_json::from_str::<RawScoringCriteria>(&read_to_string(path)?)
            .map_err(|source| CliError::CriteriaJson {
                path: path.to_path_buf(),
                source,
            })?,
        None => RawScoringCriteria::default(),
    };

    if min_score.is_some() {
        raw.minimum_score = min_score;
    }

    Ok(ScoringCriteria::try_from(raw)?)
}

fn load_records(path: &Path, format: InputFormat) -> Result<Vec<CompanyRecord>, CliError> {
    let records = match format.resolve(path) {
        InputFormat::Csv => {
            let file = File::open(path).map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            records_from_csv(BufReader::new(file))?
        }
        _ => records_from_json(&read_to_string(path)?)?,
    };

    Ok(records)
}
