// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ngram_suggest::binary::{open_index, read_header, write_index};
use ngram_suggest::config::{read_descriptions_file, IndexDescription};
use ngram_suggest::ranking::uniform;
use ngram_suggest::service::load_description;
use ngram_suggest::{MergeAlgorithm, MetricKind, SearchConfig, SearchIndex};

mod cli;
use cli::{display, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Build { config, name } => run_build(&config, name.as_deref()),
        Commands::Suggest {
            config,
            name,
            query,
            top_k,
            metric,
            similarity,
            merger,
        } => run_suggest(&config, &name, &query, top_k, metric, similarity, merger),
        Commands::Autocomplete {
            config,
            name,
            prefix,
            limit,
        } => run_autocomplete(&config, &name, &prefix, limit),
        Commands::Inspect { file } => run_inspect(&file),
    }
}

fn find_description(config: &Path, name: &str) -> Result<IndexDescription> {
    let descriptions =
        read_descriptions_file(config).with_context(|| format!("reading {}", config.display()))?;
    descriptions
        .into_iter()
        .find(|description| description.name == name)
        .ok_or_else(|| anyhow!("no index `{}` in {}", name, config.display()))
}

/// The binary index if one was built, otherwise a fresh in-memory build.
fn load(description: &IndexDescription) -> Result<SearchIndex> {
    if let Some(output) = description.output.as_deref().filter(|path| path.exists()) {
        let config = description.config()?;
        return open_index(&config, output).with_context(|| format!("loading {}", output.display()));
    }
    info!(
        name = %description.name,
        "no binary index, building from source"
    );
    load_description(description).with_context(|| format!("building `{}`", description.name))
}

fn run_build(config: &Path, only: Option<&str>) -> Result<()> {
    let descriptions: Vec<IndexDescription> = read_descriptions_file(config)
        .with_context(|| format!("reading {}", config.display()))?
        .into_iter()
        .filter(|d| only.map_or(true, |name| d.name == name))
        .collect();
    if descriptions.is_empty() {
        bail!("nothing to build");
    }

    #[cfg(feature = "parallel")]
    let progress = {
        let template = "{spinner:.cyan} [{bar:30.cyan/dim}] {pos}/{len} {msg}";
        let style = indicatif::ProgressStyle::with_template(template)
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
            .progress_chars("━━╸");
        let bar = indicatif::ProgressBar::new(descriptions.len() as u64);
        bar.set_style(style);
        bar
    };

    for description in &descriptions {
        #[cfg(feature = "parallel")]
        progress.set_message(description.name.clone());

        let output = description
            .output
            .as_deref()
            .ok_or_else(|| anyhow!("`{}` has no output path", description.name))?;
        let started = Instant::now();
        let index = load_description(description)
            .with_context(|| format!("building `{}`", description.name))?;
        let bytes =
            write_index(&index, output).with_context(|| format!("writing {}", output.display()))?;

        #[cfg(feature = "parallel")]
        progress.inc(1);

        println!(
            "{} {} → {} ({} entries, {} bytes, {})",
            display::green("✓"),
            display::bold(&description.name),
            output.display(),
            index.len(),
            bytes,
            display::timing(started.elapsed())
        );
    }

    #[cfg(feature = "parallel")]
    progress.finish_and_clear();
    Ok(())
}

fn run_suggest(
    config: &Path,
    name: &str,
    query: &str,
    top_k: usize,
    metric: MetricKind,
    similarity: f64,
    merger: MergeAlgorithm,
) -> Result<()> {
    let index = load(&find_description(config, name)?)?.with_merger(merger);
    let search = SearchConfig::new(query, top_k, metric, similarity)?;

    let started = Instant::now();
    let results = index.suggest(&search)?;
    display::print_results(&index, &results, started.elapsed());
    Ok(())
}

fn run_autocomplete(config: &Path, name: &str, prefix: &str, limit: usize) -> Result<()> {
    let index = load(&find_description(config, name)?)?;

    let started = Instant::now();
    let results = index.autocomplete(prefix, limit, &uniform)?;
    display::print_results(&index, &results, started.elapsed());
    Ok(())
}

fn run_inspect(file: &Path) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let header = read_header(&bytes).with_context(|| format!("validating {}", file.display()))?;
    display::print_header(&file.display().to_string(), bytes.len(), &header);
    Ok(())
}
