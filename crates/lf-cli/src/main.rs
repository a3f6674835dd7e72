//! ListForge CLI
//!
//! CLI tool for reducing merged domain lists to a canonical set.

mod config;
mod error;
mod lists;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lf_compiler::{normalize_entry, reconcile, Reconciler, ShardCoordinator};
use lf_core::domain::{classify, EntryKind};

use crate::config::ReconcileConfig;
use crate::error::CliError;
use crate::lists::{load_domain_lists, load_string_lists, render_domain_list, write_if_changed};

#[derive(Parser)]
#[command(name = "lf-cli")]
#[command(about = "ListForge domain list reconciler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct RuleArgs {
    /// Input domain list files
    #[arg(short, long, required = true)]
    input: Vec<String>,

    /// JSON reconcile config (whitelist, keywords, shards)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra whitelist files, one string per line
    #[arg(long)]
    whitelist: Vec<String>,

    /// Extra keyword files, one keyword per line
    #[arg(long)]
    keywords: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile domain lists into a canonical list
    Reconcile {
        #[command(flatten)]
        rules: RuleArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of shard workers (overrides the config file)
        #[arg(short, long)]
        shards: Option<usize>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Explain whether a single entry would be kept
    Check {
        /// Entry to check, e.g. `ads.example.com` or `.example.com`
        entry: String,

        #[command(flatten)]
        rules: RuleArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Reconcile { verbose: true, .. });
    init_tracing(verbose);

    let result = match cli.command {
        Commands::Reconcile {
            rules,
            output,
            shards,
            ..
        } => cmd_reconcile(&rules, output.as_deref(), shards),
        Commands::Check { entry, rules } => cmd_check(&entry, &rules),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(rules: &RuleArgs) -> Result<ReconcileConfig, CliError> {
    let mut config = ReconcileConfig::load_optional(rules.config.as_deref())?;
    config.extend(load_string_lists(&rules.whitelist)?, load_string_lists(&rules.keywords)?);
    Ok(config)
}

fn cmd_reconcile(
    rules: &RuleArgs,
    output: Option<&Path>,
    shards: Option<usize>,
) -> Result<(), CliError> {
    let start = Instant::now();
    let config = load_config(rules)?;
    let options = config.to_options();

    let mut loaded = load_domain_lists(&rules.input)?;
    let load_time = start.elapsed();

    let rec_start = Instant::now();
    let stats = match shards.or(config.shards) {
        Some(count) if count != 1 => ShardCoordinator::new(count)?.run(&mut loaded.domains, &options)?,
        _ => reconcile(&mut loaded.domains, &options),
    };
    let rec_time = rec_start.elapsed();

    let rendered = render_domain_list(&loaded.domains);
    match output {
        Some(path) => {
            let written = write_if_changed(path, &rendered)?;
            if !written {
                log::info!("'{}' is already up to date", path.display());
            }
        }
        None => print!("{rendered}"),
    }

    let total_time = start.elapsed();
    if let Some(path) = output {
        println!("Reconciled {} lists to '{}'", loaded.files, path.display());
        println!("  Lines:      {}", loaded.lines);
        println!("  Malformed:  {}", loaded.malformed);
        println!(
            "  Entries:    {} -> {} (removed {})",
            stats.before,
            stats.after,
            stats.removed()
        );
        println!(
            "  Removed:    whitelist {}, keyword {}, subsumed {}",
            stats.whitelisted, stats.keyword_matched, stats.subsumed
        );
        println!(
            "  Time:       {:.1}ms (load: {:.1}ms, reconcile: {:.1}ms)",
            total_time.as_secs_f64() * 1000.0,
            load_time.as_secs_f64() * 1000.0,
            rec_time.as_secs_f64() * 1000.0,
        );
    }

    Ok(())
}

fn cmd_check(entry: &str, rules: &RuleArgs) -> Result<(), CliError> {
    let config = load_config(rules)?;
    let entry = normalize_entry(entry).ok_or_else(|| CliError::MalformedEntry(entry.to_string()))?;
    let mut loaded = load_domain_lists(&rules.input)?;
    loaded.domains.insert(entry.clone());

    let kind = match classify(&entry) {
        EntryKind::Exact => "exact",
        EntryKind::Suffix => "suffix",
    };

    let reconciler = Reconciler::new(&loaded.domains, &config.to_options());
    match reconciler.explain(&entry) {
        Some(removal) => match removal.matched {
            Some(matched) => println!("{entry} [{kind}]: removed ({}: {matched:?})", removal.reason),
            None => println!("{entry} [{kind}]: removed ({})", removal.reason),
        },
        None => println!("{entry} [{kind}]: kept"),
    }

    Ok(())
}
