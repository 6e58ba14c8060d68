mod config;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use config::{CliOverrides, ConfigMerger};
use schemacheck_core::adapters::FsCorpusSource;
use schemacheck_core::error::EXIT_ABORTED;
use schemacheck_core::{CheckSettings, run_check};
use schemacheck_render::{render_json, render_text};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Parser)]
#[command(
    name = "schemacheck",
    version,
    about = "Check edit-packet and patch fixtures and examples against their schemas."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate fixtures and examples; exit 1 if any counted violation is found.
    Check(CheckArgs),
    /// Print the resolved schema paths, fixture location, and example manifest.
    Manifest(ManifestArgs),
}

#[derive(Debug, Parser)]
struct LayoutArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Config file (default: <repo_root>/schemacheck.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Edit-packet schema, relative to the repo root.
    #[arg(long)]
    packet_schema: Option<Utf8PathBuf>,

    /// Patch schema, relative to the repo root.
    #[arg(long)]
    patch_schema: Option<Utf8PathBuf>,

    /// Fixture directory, relative to the repo root.
    #[arg(long)]
    fixtures_dir: Option<Utf8PathBuf>,

    /// Glob matched against fixture file names.
    #[arg(long)]
    fixture_pattern: Option<String>,
}

#[derive(Debug, Parser)]
struct CheckArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ManifestArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(EXIT_ABORTED)
        }
    }
}

fn real_main() -> anyhow::Result<u8> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Manifest(args) => cmd_manifest(args),
    }
}

fn resolve_settings(args: LayoutArgs) -> anyhow::Result<CheckSettings> {
    let file_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(&args.repo_root).context("load schemacheck.toml config")?,
    };
    let cli = CliOverrides {
        packet_schema: args.packet_schema,
        patch_schema: args.patch_schema,
        fixtures_dir: args.fixtures_dir,
        fixture_pattern: args.fixture_pattern,
    };
    let settings = ConfigMerger::new(file_config).merge(args.repo_root, cli);
    debug!("resolved settings: {:?}", settings);
    Ok(settings)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<u8> {
    let settings = resolve_settings(args.layout)?;
    let report = run_check(&settings, &FsCorpusSource).context("check aborted")?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", render_json(&report).context("serialize report")?),
    }
    Ok(report.exit_code())
}

fn cmd_manifest(args: ManifestArgs) -> anyhow::Result<u8> {
    let settings = resolve_settings(args.layout)?;

    match args.format {
        OutputFormat::Text => {
            println!("packet schema:   {}", settings.packet_schema);
            println!("patch schema:    {}", settings.patch_schema);
            println!(
                "fixtures:        {}/{}",
                settings.fixtures_dir, settings.fixture_pattern
            );
            println!("examples:");
            for entry in settings.ordered_examples() {
                println!("  {:<8} {}", entry.kind.as_str(), entry.path);
            }
        }
        OutputFormat::Json => {
            let examples: Vec<_> = settings
                .ordered_examples()
                .into_iter()
                .map(|e| {
                    serde_json::json!({
                        "path": e.path,
                        "kind": e.kind,
                    })
                })
                .collect();
            let doc = serde_json::json!({
                "packet_schema": settings.packet_schema,
                "patch_schema": settings.patch_schema,
                "fixtures_dir": settings.fixtures_dir,
                "fixture_pattern": settings.fixture_pattern,
                "examples": examples,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(0)
}
