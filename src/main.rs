// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use dalil::{
    build_for_size, build_suggestions, intersect, parse_script, replay, search_with_min,
    Category, Governorate, LabelTable, RecordStore, ReplayEvent, SearchConfig, SearchField,
    SearchFilters, SuggestionLimits, Translator,
};

mod cli;
use cli::display::{
    badge, error_prefix, offset, pad_left, pad_right, rating_stars, row, section_bot,
    section_mid, section_top, state_badge, themed, timing_ms, BOLD, CYAN, GRAY,
};
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", error_prefix(), err);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for results.
fn init_tracing(verbose: bool) {
    let default = if verbose { "dalil=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("DALIL_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => SearchConfig::from_path(path).context("loading search configuration")?,
        None => SearchConfig::default(),
    };

    match cli.command {
        Commands::Index { input } => run_index(&input, &config),
        Commands::Search {
            input,
            query,
            category,
            governorate,
            district,
            min_rating,
            verified,
            premium,
            labels,
            limit,
        } => {
            let mut filters = SearchFilters {
                category: category.map(Category::from),
                min_rating,
                verified,
                premium,
                ..SearchFilters::default()
            };
            filters.set_governorate(governorate.map(Governorate::from));
            if district.is_some() && filters.governorate != Some(Governorate::Tunis) {
                bail!("--district only applies with --governorate tunis");
            }
            filters.district = district;
            let limit = limit.unwrap_or(config.max_results);
            run_search(&input, &query, &filters, labels.as_deref(), limit, &config)
        }
        Commands::Replay {
            input,
            script,
            labels,
        } => run_replay(&input, &script, labels.as_deref(), &config),
    }
}

fn load_store(path: &Path) -> Result<RecordStore> {
    RecordStore::from_path(path).with_context(|| format!("loading catalog {}", path.display()))
}

fn load_labels(path: Option<&Path>) -> Result<LabelTable> {
    match path {
        Some(path) => LabelTable::from_path(path)
            .with_context(|| format!("loading labels {}", path.display())),
        None => Ok(LabelTable::builtin_fr()),
    }
}

fn run_index(input: &Path, config: &SearchConfig) -> Result<()> {
    let store = load_store(input)?;
    let started = Instant::now();
    let index = build_for_size(&store, config.parallel_threshold);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    section_top("CATALOG");
    row(&format!(" records   {}", store.len()));
    row(&format!(" version   {}", store.version()));
    row(&format!(" built in  {}", timing_ms(elapsed_ms)));

    section_mid("TOKEN MAPS");
    row(&format!(
        " {}{}{}",
        pad_right(&themed(GRAY, &[], "field"), 16),
        pad_left(&themed(GRAY, &[], "tokens"), 10),
        pad_left(&themed(GRAY, &[], "postings"), 12)
    ));
    for field in SearchField::ALL {
        let map = index.field(field);
        row(&format!(
            " {}{}{}",
            pad_right(field.as_str(), 16),
            pad_left(&map.len().to_string(), 10),
            pad_left(&map.posting_count().to_string(), 12)
        ));
    }
    row(&format!(
        " {}{}",
        pad_right(&themed(CYAN, &[BOLD], "total"), 16),
        pad_left(&index.term_count().to_string(), 10)
    ));

    section_mid("EQUALITY MAPS");
    let categories = Category::ALL
        .iter()
        .filter(|c| !index.with_category(c.code()).is_empty())
        .count();
    let governorates = Governorate::ALL
        .iter()
        .filter(|g| !index.with_governorate(g.code()).is_empty())
        .count();
    row(&format!(" categories    {} of {}", categories, Category::ALL.len()));
    row(&format!(" governorates  {} of {}", governorates, Governorate::ALL.len()));
    section_bot();
    Ok(())
}

fn run_search(
    input: &Path,
    query: &str,
    filters: &SearchFilters,
    labels: Option<&Path>,
    limit: usize,
    config: &SearchConfig,
) -> Result<()> {
    let store = load_store(input)?;
    let labels = load_labels(labels)?;
    let index = build_for_size(&store, config.parallel_threshold);

    let mut hits = search_with_min(&index, query, config.min_query_chars);
    if !filters.is_empty() {
        hits = intersect(&hits, &filters.apply(&index, &store));
    }
    let suggestions = build_suggestions(
        query,
        store.resolve(&hits),
        &labels,
        SuggestionLimits::from(config),
    );

    section_top(&format!("RESULTS \"{}\"", query.trim()));
    if hits.is_empty() {
        row(&themed(GRAY, &[], " no matches"));
    }
    for (rank, record) in store.resolve(&hits).take(limit).enumerate() {
        let mut line = format!(
            " {} {}  {}",
            pad_left(&(rank + 1).to_string(), 3),
            pad_right(&themed(CYAN, &[BOLD], &record.name), 32),
            rating_stars(record.rating)
        );
        if record.verified {
            line.push(' ');
            line.push_str(&badge("verified"));
        }
        if record.premium {
            line.push(' ');
            line.push_str(&badge("premium"));
        }
        row(&line);
        row(&themed(
            GRAY,
            &[],
            &format!(
                "     {} · {} · {}",
                labels.translate(record.category.code()),
                record.subcategory,
                labels.translate(record.governorate.code())
            ),
        ));
    }
    if hits.len() > limit {
        row(&themed(
            GRAY,
            &[],
            &format!(" showing {} of {} hits", limit, hits.len()),
        ));
    }
    if filters.active_count() > 0 {
        row(&themed(
            GRAY,
            &[],
            &format!(" {} active filter(s)", filters.active_count()),
        ));
    }

    section_mid("SUGGESTIONS");
    if suggestions.is_empty() {
        row(&themed(GRAY, &[], " none"));
    }
    for suggestion in &suggestions {
        row(&format!(" {}", suggestion));
    }
    section_bot();
    Ok(())
}

fn run_replay(
    input: &Path,
    script: &Path,
    labels: Option<&Path>,
    config: &SearchConfig,
) -> Result<()> {
    let store = load_store(input)?;
    let labels = load_labels(labels)?;
    let text = std::fs::read_to_string(script)
        .with_context(|| format!("reading keystroke script {}", script.display()))?;
    let keys = parse_script(&text).with_context(|| format!("parsing {}", script.display()))?;

    let log = replay(&store, config, &labels, &keys);

    section_top(&format!("REPLAY  {} keystrokes", keys.len()));
    for event in &log.events {
        match event {
            ReplayEvent::Keystroke { at, text, state } => {
                let shown = if text.trim().is_empty() {
                    themed(GRAY, &[], "(clear)")
                } else {
                    format!("\"{}\"", text)
                };
                row(&format!(" {}  {}  {}", offset(*at), state_badge(*state), shown));
            }
            ReplayEvent::Dispatched { at, outcome } => {
                row(&format!(
                    " {}  {}  {} hit(s), {} suggestion(s)",
                    offset(*at),
                    themed(CYAN, &[BOLD], &format!("dispatch \"{}\"", outcome.query)),
                    outcome.total_hits,
                    outcome.suggestions.len()
                ));
            }
        }
    }

    section_mid("SUMMARY");
    row(&format!(" keystrokes       {}", log.controller.keystrokes));
    row(&format!(" dispatches       {}", log.controller.dispatches));
    row(&format!(" clears           {}", log.controller.clears));
    row(&format!(" stale dropped    {}", log.controller.stale_suppressed));
    row(&format!(" index builds     {}", log.cache.builds));
    section_bot();
    Ok(())
}
