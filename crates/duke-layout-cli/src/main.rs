//! Duke Layout CLI - spreadsheet to document conversion tool

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use duke_layout::prelude::*;
use duke_layout::{load_lexicon, load_worksheet};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "duke-layout")]
#[command(
    author,
    version,
    about = "Turn spreadsheet layouts into HTML documents and SQL tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Classification lexicon (JSON); missing fields keep their defaults
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    /// Write the job status to this JSON file (with --output)
    #[arg(long, global = true)]
    status_file: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args)]
struct Output {
    /// Input sheet (json, csv, tsv)
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Job identifier
    #[arg(long, default_value = "0")]
    job_id: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a sheet as an HTML document
    Html {
        #[command(flatten)]
        target: Output,

        /// Document title (default: sheet title)
        #[arg(long)]
        title: Option<String>,

        /// Prefix for image asset references
        #[arg(long, default_value = "/storage/")]
        asset_prefix: String,
    },

    /// Export one section of a sheet as SQL
    Sql {
        #[command(flatten)]
        target: Output,

        /// Section to export
        #[arg(short, long, default_value = "DIMENSIONS")]
        section: String,

        /// Table name prefix
        #[arg(long, default_value = "excel_import_job")]
        prefix: String,

        /// Rows per INSERT statement
        #[arg(long, default_value = "100")]
        batch_size: usize,
    },

    /// Print the class of every row
    Classify {
        /// Input sheet (json, csv, tsv)
        input: PathBuf,
    },

    /// Print the block outline of a sheet
    Blocks {
        /// Input sheet (json, csv, tsv)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut options = ConvertOptions::new();
    if let Some(path) = &cli.lexicon {
        let lexicon = load_lexicon(path)
            .with_context(|| format!("Failed to load lexicon '{}'", path.display()))?;
        options = options.with_lexicon(lexicon);
    }

    match cli.command {
        Commands::Html {
            target,
            title,
            asset_prefix,
        } => {
            options.render = options.render.with_asset_prefix(asset_prefix);
            if let Some(title) = title {
                options.render = options.render.with_title(title);
            }
            convert(
                &target,
                options.with_format(OutputFormat::Html),
                cli.status_file.as_deref(),
            )
        }
        Commands::Sql {
            target,
            section,
            prefix,
            batch_size,
        } => {
            options.export = options
                .export
                .with_table_prefix(prefix)
                .with_batch_size(batch_size);
            convert(
                &target,
                options.with_format(OutputFormat::Sql).with_section(section),
                cli.status_file.as_deref(),
            )
        }
        Commands::Classify { input } => classify(&input, &options),
        Commands::Blocks { input } => outline(&input, &options),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn convert(target: &Output, options: ConvertOptions, status_file: Option<&Path>) -> Result<()> {
    let options = options.with_job_id(target.job_id);

    let Some(output) = &target.output else {
        if status_file.is_some() {
            tracing::warn!("--status-file is ignored without --output");
        }
        let converter = Converter::new(options.clone()).context("Invalid lexicon")?;
        let sheet = load_worksheet(&target.input, &options)
            .with_context(|| format!("Failed to open '{}'", target.input.display()))?;
        let content = converter
            .convert(&sheet)
            .with_context(|| format!("Failed to convert '{}'", target.input.display()))?;
        return io::stdout()
            .write_all(content.as_bytes())
            .context("Failed to write to stdout");
    };

    let result = match status_file {
        Some(path) => run_job(&target.input, output, &options, &mut JsonStatusFile::new(path)),
        None => run_job(&target.input, output, &options, &mut LogStatus),
    };
    result.with_context(|| format!("Failed to convert '{}'", target.input.display()))?;
    eprintln!("Wrote {} to '{}'", options.format, output.display());
    Ok(())
}

fn classify(input: &Path, options: &ConvertOptions) -> Result<()> {
    let converter = Converter::new(options.clone()).context("Invalid lexicon")?;
    let sheet = load_worksheet(input, options)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    let grid = converter.grid(&sheet).context("Failed to build grid")?;

    let mut out = io::stdout().lock();
    for classified in converter.classify(&grid) {
        writeln!(
            out,
            "{}\t{}\t{}",
            classified.row.index,
            classified.class,
            classified.row.text().replace('\n', " ")
        )
        .context("Failed to write to stdout")?;
    }
    Ok(())
}

fn outline(input: &Path, options: &ConvertOptions) -> Result<()> {
    let converter = Converter::new(options.clone()).context("Invalid lexicon")?;
    let sheet = load_worksheet(input, options)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    let blocks = converter.blocks(&sheet).context("Failed to build grid")?;

    let mut out = io::stdout().lock();
    for block in &blocks {
        let span = block.span();
        writeln!(
            out,
            "{}\t{}-{}\t{}",
            block.kind(),
            span.first,
            span.last,
            block.summary().replace('\n', " ")
        )
        .context("Failed to write to stdout")?;
    }
    Ok(())
}
