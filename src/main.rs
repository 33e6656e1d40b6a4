use std::io;

use clap::{Parser, ValueEnum};

use schemascout::config::ScanConfig;
use schemascout::export::{DataFormat, OutputSink, default_output_path, detect_data_format};
use schemascout::scan::run_scan;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "schemascout",
    version,
    about = "Discover and classify a company's public product catalog from its website"
)]
struct Cli {
    #[arg(value_name = "DOMAIN")]
    domain: String,

    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    #[arg(long, value_enum, default_value_t = FileFormatArg::Csv)]
    format: FileFormatArg,

    #[arg(long, value_name = "N")]
    max_entries: Option<usize>,

    #[arg(long, default_value_t = false)]
    no_export: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum, PartialEq, Eq)]
enum FileFormatArg {
    Csv,
    Json,
}

impl From<FileFormatArg> for DataFormat {
    fn from(value: FileFormatArg) -> Self {
        match value {
            FileFormatArg::Csv => DataFormat::Csv,
            FileFormatArg::Json => DataFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = ScanConfig::default();
    if let Some(max) = cli.max_entries {
        config.max_entries = max.max(1);
    }

    let report = run_scan(&cli.domain, &config).await;

    if !report.found_catalog() {
        eprintln!(
            "no catalog data found matching standard schemas for {}",
            report.domain
        );
        eprintln!(
            "the site may be a client-rendered single page app or use a non-standard URL structure"
        );
        return Ok(());
    }

    if let Some(dominant) = report.dominant_schema {
        println!("Strategy detected: {}", dominant.label());
        if let Some(hint) = report.positioning_hint() {
            println!(
                "{} entries found; this company {hint}",
                report.entries.len()
            );
        }
        println!();
    }
    for entry in &report.entries {
        println!(
            "{:<44} {:<18} {:<14} {}",
            entry.name,
            entry.schema.label(),
            entry.source.label(),
            entry.url
        );
    }

    if cli.no_export {
        return Ok(());
    }

    let configured_format: DataFormat = cli.format.into();
    let output_format = cli
        .output
        .as_deref()
        .map(|path| detect_data_format(path, configured_format))
        .unwrap_or(configured_format);
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&report.domain, output_format));

    let mut sink = OutputSink::new(&output_path, output_format)?;
    for entry in &report.entries {
        sink.write_entry(entry)?;
    }
    sink.finalize()?;

    eprintln!(
        "finished scan: entries={} dominant={} output={}",
        report.entries.len(),
        report
            .dominant_schema
            .map(|schema| schema.label())
            .unwrap_or("none"),
        output_path
    );
    Ok(())
}
