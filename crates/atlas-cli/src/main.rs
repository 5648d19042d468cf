// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use atlas_core::config::AtlasConfig;
use atlas_core::corpus::{write_json_atomic, Corpus};
use atlas_core::export::save_itinerary;
use atlas_core::index::LexicalIndex;
use atlas_core::itinerary::{ItineraryPlanner, Preferences};
use atlas_core::llm::GenerationCapability;
use atlas_core::pipeline::{rebuild_index, run_pipeline};
use atlas_core::qa::QaResolver;
use atlas_core::reconcile::{reconcile, CorpusStats};
use atlas_core::record::parse_raw_str;
use atlas_core::{get_completeness, get_theme, ProjectLayout};
use atlas_heuristics::HeuristicsModel;
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project root holding raw/, corpus/, index/ and itineraries/
    #[arg(short, long, env = "ATLAS_ROOT")]
    root: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge raw scraper output, reconcile it and rebuild the index
    Pipeline {
        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reconcile a single raw dump into a cleaned corpus
    Reconcile {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        stats: Option<PathBuf>,
    },
    /// Print the corpus quality report and a few sample tours
    Stats {
        #[arg(long, default_value_t = 5)]
        samples: usize,
    },
    /// Answer one question about the tours
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Interactive question loop (quit, exit or bye to leave)
    Chat,
    /// Suggest an itinerary
    Itinerary {
        #[arg(short, long)]
        location: Option<String>,
        #[arg(short, long)]
        duration: Option<String>,
        #[arg(short, long)]
        interests: Option<String>,
        #[arg(short, long)]
        budget: Option<String>,
        #[arg(long)]
        style: Option<String>,
        #[arg(long)]
        special: Option<String>,
        /// Also write the itinerary under itineraries/
        #[arg(long)]
        save: bool,
    },
    /// Classify free text into a theme
    Theme {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Completeness score of every record in a raw dump
    Score { file: PathBuf },
    /// Rebuild the vector index from the current corpus
    Index,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = simplelog::ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    // Fails only when a logger is already installed.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn print_stats(stats: &CorpusStats) {
    println!("Total tours: {}", stats.total_tours);
    println!(
        "  with destinations: {} ({}%)",
        stats.tours_with_destinations, stats.destinations_percentage
    );
    println!(
        "  with price:        {} ({}%)",
        stats.tours_with_price, stats.price_percentage
    );
    println!(
        "  with duration:     {} ({}%)",
        stats.tours_with_duration, stats.duration_percentage
    );
    println!(
        "  with highlights:   {} ({}%)",
        stats.tours_with_highlights, stats.highlights_percentage
    );
    println!("Themes:");
    for (theme, count) in stats.themes_by_count() {
        println!("  {:<18} {}", theme, count);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = match cli.root {
        Some(path) => path,
        None => std::env::current_dir().context("Could not resolve the current directory")?,
    };
    log::debug!("[CLI] Project root {:?}", root);
    let layout = ProjectLayout::open(&root);
    let config = AtlasConfig::load();
    let model = HeuristicsModel::load();

    match &cli.command {
        Commands::Pipeline { json } => {
            let summary = run_pipeline(&root, &model, &config)
                .with_context(|| format!("Pipeline failed for {}", root.display()))?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            for source in &summary.sources {
                println!("  {:>6} records  {}", source.records, source.path.display());
            }
            for skipped in &summary.skipped_sources {
                println!("  skipped        {}", skipped.display());
            }
            println!(
                "Raw records: {}  ->  tours: {}  ({} duplicates removed, {} index chunks)",
                summary.raw_total,
                summary.cleaned_total,
                summary.duplicates_removed,
                summary.indexed_chunks
            );
            print_stats(&summary.report.stats);
        }
        Commands::Reconcile {
            input,
            output,
            stats,
        } => {
            let input = input.clone().unwrap_or_else(|| layout.primary_source_path());
            let output = output.clone().unwrap_or_else(|| layout.corpus_path());
            let stats_path = stats.clone().unwrap_or_else(|| layout.stats_path());

            let content = fs::read_to_string(&input)
                .with_context(|| format!("Could not read {}", input.display()))?;
            let records = parse_raw_str(&content)
                .with_context(|| format!("{} is not a list of tour records", input.display()))?;

            let (corpus, report) = reconcile(records, &model);
            write_json_atomic(&output, &corpus)
                .with_context(|| format!("Could not write {}", output.display()))?;
            write_json_atomic(&stats_path, &report.stats)
                .with_context(|| format!("Could not write {}", stats_path.display()))?;

            println!(
                "Cleaned {} raw entries into {} tours -> {}",
                report.total_input,
                report.total_output,
                output.display()
            );
            println!(
                "  duplicates: {}  short names: {}  noise: {}  not a tour: {}  collisions: {}",
                report.duplicates_removed,
                report.rejected_short_name,
                report.rejected_noise,
                report.rejected_not_tour,
                report.rejected_collision
            );
        }
        Commands::Stats { samples } => {
            let corpus = Corpus::load(&layout, &model);
            print_stats(&CorpusStats::from_corpus(&corpus.tours));

            if !corpus.is_empty() {
                println!("\nSample tours:");
            }
            for tour in corpus.iter().take(*samples) {
                println!(
                    "  {} [{}] {} | {} | score {}",
                    tour.name,
                    tour.theme,
                    tour.duration,
                    tour.price,
                    tour.metadata.completeness_score
                );
            }
        }
        Commands::Ask { question } => {
            let corpus = Corpus::load(&layout, &model);
            let index = LexicalIndex::load_or_empty(&layout.index_path(), config.similarity_threshold);
            let generation = GenerationCapability::detect(&config);
            let resolver = QaResolver::new(&corpus, &index, &generation, &config);

            println!("{}", resolver.answer_question(&question.join(" ")).text);
        }
        Commands::Chat => {
            let corpus = Corpus::load(&layout, &model);
            let index = LexicalIndex::load_or_empty(&layout.index_path(), config.similarity_threshold);
            let generation = GenerationCapability::detect(&config);
            let resolver = QaResolver::new(&corpus, &index, &generation, &config);

            println!(
                "Ask about our tours ({} loaded). Type quit, exit or bye to leave.",
                corpus.len()
            );
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();
            loop {
                print!("\nYou: ");
                io::stdout().flush()?;
                let Some(line) = lines.next() else {
                    break;
                };
                let line = line?;
                let question = line.trim();
                if matches!(question.to_lowercase().as_str(), "quit" | "exit" | "bye") {
                    println!("Goodbye!");
                    break;
                }
                if question.is_empty() {
                    continue;
                }
                println!("\n{}", resolver.answer_question(question).text);
            }
        }
        Commands::Itinerary {
            location,
            duration,
            interests,
            budget,
            style,
            special,
            save,
        } => {
            let prefs = Preferences {
                location: location.clone().unwrap_or_default(),
                duration: duration.clone().unwrap_or_default(),
                interests: interests.clone().unwrap_or_default(),
                budget: budget.clone().unwrap_or_default(),
                style: style.clone().unwrap_or_default(),
                special: special.clone().unwrap_or_default(),
            };

            let corpus = Corpus::load(&layout, &model);
            let index = LexicalIndex::load_or_empty(&layout.index_path(), config.similarity_threshold);
            let generation = GenerationCapability::detect(&config);
            let planner = ItineraryPlanner::new(&corpus, &index, &generation, &config);

            let itinerary = planner.generate_itinerary(prefs);
            println!("{}", itinerary.text);

            if *save {
                let path = save_itinerary(&layout, &itinerary).context("Could not save itinerary")?;
                println!("\nSaved to {}", path.display());
            }
        }
        Commands::Theme { text } => {
            println!("{}", get_theme(&model, &text.join(" ")));
        }
        Commands::Score { file } => {
            let content = fs::read_to_string(file)
                .with_context(|| format!("Could not read {}", file.display()))?;
            let records = parse_raw_str(&content)
                .with_context(|| format!("{} is not a list of tour records", file.display()))?;

            let mut total: u64 = 0;
            for record in &records {
                let score = get_completeness(record);
                total += u64::from(score);
                println!("{:>3}  {}", score, record.trimmed_name());
            }
            if !records.is_empty() {
                println!(
                    "Average completeness: {:.1} over {} records",
                    total as f64 / records.len() as f64,
                    records.len()
                );
            }
        }
        Commands::Index => {
            let corpus = Corpus::load(&layout, &model);
            layout.ensure_output_dirs()?;
            let chunks = rebuild_index(&layout, &corpus.tours, &config)
                .context("Could not rebuild the vector index")?;
            println!(
                "Indexed {} chunks from {} tours -> {}",
                chunks,
                corpus.len(),
                layout.index_path().display()
            );
        }
    }

    Ok(())
}
