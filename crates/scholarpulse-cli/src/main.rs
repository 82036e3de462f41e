//! Scholar Pulse — Research Integrity Measure (RIM) analysis.
//! Entry point for the CLI binary.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use scholarpulse_common::Settings;
use scholarpulse_enrichment::sources::crossref::CrossRefClient;
use scholarpulse_enrichment::sources::semanticscholar::SemanticScholarClient;
use scholarpulse_enrichment::sources::serpapi::SerpApiClient;
use scholarpulse_enrichment::sources::unpaywall::UnpaywallClient;
use scholarpulse_enrichment::EnrichmentSources;
use scholarpulse_pipeline::export::{default_export_stem, to_json_string, write_csv};
use scholarpulse_pipeline::{analyze, AnalysisJob, ScholarReport};
use scholarpulse_scorer::WeightTable;

#[derive(Parser)]
#[command(
    name = "scholarpulse",
    version,
    about = "Compute a scholar's Research Integrity Measure from public bibliographic sources"
)]
struct Cli {
    /// Google Scholar author identifier (from the profile URL)
    scholar_id: String,

    /// Publications to select, by citation count
    #[arg(long, default_value_t = 10)]
    top_n: usize,

    /// TOML weight-policy file; omitted means the built-in default table
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Output path; derived from the scholar name when omitted
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Reference year for citations-per-year (overrides CURRENT_YEAR)
    #[arg(long)]
    current_year: Option<i32>,

    /// Concurrent enrichment lookups; 1 enables the polite sequential mode
    #[arg(long, default_value_t = 3)]
    concurrency: usize,

    /// Whole-run timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    let weights = match &cli.weights {
        Some(path) => WeightTable::from_toml_file(path)?,
        None => WeightTable::default(),
    };

    let profile_source = SerpApiClient::new(settings.serpapi_key.clone())?;
    let sources = EnrichmentSources {
        citations: Arc::new(CrossRefClient::new()?),
        retraction: Arc::new(SemanticScholarClient::new()?),
        open_access: Arc::new(UnpaywallClient::new(settings.unpaywall_email.clone())?),
    };

    let mut job = AnalysisJob::new(
        &cli.scholar_id,
        cli.current_year.unwrap_or(settings.current_year),
    );
    job.top_n = cli.top_n;
    job.weights = weights;
    job.enrichment_concurrency = cli.concurrency;
    job.run_timeout = cli.timeout_secs.map(Duration::from_secs);

    let report = analyze(&job, &profile_source, &sources).await?;
    print_summary(&report);

    let path = cli.output.unwrap_or_else(|| {
        let ext = match cli.format {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        PathBuf::from(format!("{}.{ext}", default_export_stem(&report)))
    });
    match cli.format {
        OutputFormat::Csv => write_csv(&report, &path)?,
        OutputFormat::Json => std::fs::write(&path, to_json_string(&report)?)?,
    }
    println!("Report written to {}", path.display());

    Ok(())
}

fn print_summary(report: &ScholarReport) {
    let name = report.scholar_name.as_deref().unwrap_or(&report.scholar_id);
    println!("Results for {name}");
    println!(
        "  Papers: {}   Total citations: {}   Open access: {:.0}%",
        report.publications.len(),
        report.total_citations(),
        report.open_access_share() * 100.0
    );
    println!();

    for (i, p) in report.publications.iter().enumerate() {
        let retracted = if p.record.is_retracted == scholarpulse_enrichment::TriState::Yes {
            "  [RETRACTED]"
        } else {
            ""
        };
        println!(
            "  {:>2}. RIM {:>5.1}  {:<9}  {}{retracted}",
            i + 1,
            p.rim_score,
            p.band.as_str(),
            p.record.title
        );
    }

    println!();
    println!(
        "  Aggregate RIM: {:.1} ({})",
        report.aggregate_rim,
        report.aggregate_band.as_str()
    );
    if report.degraded_publications > 0 {
        println!(
            "  Degraded data: {} of {} publications carry {} unknown field(s)",
            report.degraded_publications,
            report.publications.len(),
            report.unknown_fields
        );
    }
}
