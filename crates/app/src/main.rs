use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use intellisearch_core::{
    render_item, Citation, Corpus, EvidenceSource, MatchOrigin, QueryResolver, RenderedItem,
    Resolution, Segment, Session, SystemMetrics, Topic, SAMPLE_QUERIES, TRIGGER_GROUPS,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "intellisearch", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a query against the demo corpus and print the evidence.
    Search {
        /// Free-text search query.
        #[arg(long)]
        query: String,
        /// Emit the resolution as JSON instead of formatted text.
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Append the full citation detail view after the results.
        #[arg(long, default_value_t = false)]
        citations: bool,
        /// Attach a file to the query. Accepted but not used in resolution.
        #[arg(long)]
        attach: Vec<PathBuf>,
    },
    /// Show the detail view for one citation id.
    Citation {
        #[arg(long)]
        id: u32,
    },
    /// List the topic buckets and their trigger words.
    Topics,
    /// Print the demo system status panel.
    Status,
    /// Query loop over stdin with a bounded recent-query list.
    Interactive,
}

fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let corpus = Corpus::builtin().context("embedded corpus failed validation")?;
    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "intellisearch boot"
    );

    match cli.command {
        Command::Search {
            query,
            json,
            citations,
            attach,
        } => {
            if !attach.is_empty() {
                warn!(
                    attachments = attach.len(),
                    "attachments are accepted but not inspected during resolution"
                );
            }

            let resolver = QueryResolver::new(corpus);
            let resolution = resolver.resolve(&query);

            if json {
                println!("{}", serde_json::to_string_pretty(&resolution)?);
                return Ok(());
            }

            print_resolution(&resolution, resolver.source());

            if citations {
                for item in &resolution.items {
                    for id in &item.citations {
                        match resolver.source().resolve_citation(*id) {
                            Ok(citation) => print_citation(*id, citation),
                            Err(error) => warn!(%error, "skipping citation detail"),
                        }
                    }
                }
            }
        }
        Command::Citation { id } => {
            let citation = corpus
                .resolve_citation(id)
                .with_context(|| format!("no citation with id {id}"))?;
            print_citation(id, citation);
        }
        Command::Topics => {
            for (topic, triggers) in TRIGGER_GROUPS {
                println!(
                    "{topic}: {} items, triggers [{}]",
                    corpus.bucket(topic).len(),
                    triggers.join(", ")
                );
            }
            println!("\nsample queries:");
            for query in SAMPLE_QUERIES {
                println!("  {query}");
            }
        }
        Command::Status => {
            let metrics = SystemMetrics::default();
            println!("all systems online");
            println!("documents indexed: {}", metrics.documents_indexed);
            println!("images processed: {}", metrics.images_processed);
            println!(
                "audio files transcribed: {}",
                metrics.audio_files_transcribed
            );
            println!("total queries: {}", metrics.total_queries);
            println!("avg response: {}", metrics.average_response_time);
            println!("uptime: {}", metrics.system_uptime);
        }
        Command::Interactive => run_interactive(corpus)?,
    }

    Ok(())
}

fn print_resolution<S: EvidenceSource>(resolution: &Resolution, source: &S) {
    println!("query: {}", resolution.query);
    match &resolution.origin {
        MatchOrigin::Trigger(trigger) => {
            println!("topic: {} (matched '{trigger}')", resolution.topic);
        }
        MatchOrigin::Fallback => {
            println!(
                "topic: {} (no confident match, showing default bucket)",
                resolution.topic
            );
        }
    }

    for item in &resolution.items {
        print_rendered(&render_item(item, source));
    }
}

fn print_rendered(rendered: &RenderedItem) {
    println!("\n[{}] {} {}", rendered.modality, rendered.source, rendered.locator);

    let mut line = String::new();
    for segment in &rendered.segments {
        match segment {
            Segment::Plain(text) => line.push_str(text),
            Segment::Emphasis(text) => {
                line.push_str("**");
                line.push_str(text);
                line.push_str("**");
            }
        }
    }
    println!("  {line}");

    if let Some(description) = &rendered.description {
        println!("  description: {description}");
    }
    if let Some(transcript) = &rendered.transcript {
        println!("  transcript: {transcript}");
    }

    println!(
        "  confidence: {:.2} ({}, {})",
        rendered.confidence,
        rendered.band,
        rendered.band.color()
    );

    let badges: Vec<String> = rendered
        .badges
        .iter()
        .map(|badge| match &badge.title {
            Some(title) => format!("[{}] {title}", badge.id),
            None => format!("[{}] (unavailable)", badge.id),
        })
        .collect();
    println!("  citations: {}", badges.join(" | "));
}

fn print_citation(id: u32, citation: &Citation) {
    println!("\ncitation [{id}] ({})", citation.kind);
    println!("  title: {}", citation.title);
    println!("  {}", citation.body);
    for (key, value) in &citation.metadata {
        println!("  {key}: {value}");
    }
}

/// Stdin loop: plain lines are queries, `:recent` lists the remembered
/// queries, `:cite <id>` opens a citation from the last resolution, `:quit`
/// exits.
fn run_interactive(corpus: Corpus) -> anyhow::Result<()> {
    let resolver = QueryResolver::new(corpus);
    let mut session = Session::new();
    info!(session_id = %session.id(), "interactive session started");

    println!("topics: {}", topic_summary());
    println!("type a query, :recent, :cite <id>, or :quit");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line == ":quit" {
            break;
        }

        if line == ":recent" {
            for recent in session.recent() {
                println!("{} {}", recent.issued_at.to_rfc3339(), recent.query);
            }
            continue;
        }

        if let Some(raw_id) = line.strip_prefix(":cite ") {
            match raw_id.trim().parse::<u32>() {
                Ok(id) => match resolver.source().resolve_citation(id) {
                    Ok(citation) => {
                        session.open_citation(id);
                        print_citation(id, citation);
                    }
                    Err(error) => println!("{error}"),
                },
                Err(_) => println!("usage: :cite <id>"),
            }
            continue;
        }

        let resolution = resolver.resolve(line);
        print_resolution(&resolution, resolver.source());
        session.record(resolution);
    }

    Ok(())
}

fn topic_summary() -> String {
    Topic::ALL
        .iter()
        .map(|topic| topic.label())
        .collect::<Vec<_>>()
        .join(", ")
}
