mod input;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use search_core::config::{DEFAULT_SHARD_COUNT, MAX_RESULT_DOCUMENT_COUNT};
use search_core::{
    paginate, process_queries, remove_duplicates, DocId, DocumentStatus, ExecutionPolicy, InvertedIndex,
    LogDuration, Parallel, RequestLog, SearchConfig, Sequential, StopWords,
};
use tracing_subscriber::{fmt, EnvFilter};

use std::path::Path;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an in-memory TF-IDF index from JSON/JSONL documents and query it", long_about = None)]
struct Cli {
    #[command(flatten)]
    index: IndexArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct IndexArgs {
    /// Input path (JSON/JSONL file or directory)
    #[arg(long)]
    input: String,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Maximum number of results per query
    #[arg(long, default_value_t = MAX_RESULT_DOCUMENT_COUNT)]
    max_results: usize,
    /// Shards in the parallel score accumulator
    #[arg(long, default_value_t = DEFAULT_SHARD_COUNT)]
    shards: usize,
    /// Use the parallel execution policy for ranking and removal
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Fail on the first invalid document instead of skipping it
    #[arg(long, default_value_t = false)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for a query
    Search {
        #[arg(long)]
        query: String,
        /// Only documents with this status (default: actual)
        #[arg(long)]
        status: Option<DocumentStatus>,
        /// Results per printed page, 0 for a single page
        #[arg(long, default_value_t = 0)]
        page_size: usize,
    },
    /// Print the query words found in one document
    Match {
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocId,
    },
    /// Remove documents with identical word sets
    Dedup,
    /// Run every query in a file (one per line) in parallel
    Batch {
        #[arg(long)]
        queries: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    if cli.index.parallel {
        run(&Parallel, cli)
    } else {
        run(&Sequential, cli)
    }
}

fn run<E: ExecutionPolicy>(policy: &E, cli: Cli) -> Result<()> {
    let mut index = build_index(&cli.index)?;

    match cli.command {
        Commands::Search { query, status, page_size } => {
            let status = status.unwrap_or_default();
            let docs = index
                .find_top_documents_by_status_with(policy, &query, status)
                .with_context(|| format!("searching for {query:?}"))?;
            let page_size = if page_size == 0 { docs.len() } else { page_size };
            for (n, page) in paginate(&docs, page_size).into_iter().enumerate() {
                println!("Page {}:", n + 1);
                for doc in page {
                    println!("{doc}");
                }
            }
            if docs.is_empty() {
                println!("No documents found");
            }
        }
        Commands::Match { query, id } => {
            let (words, status) = index.match_document_with(policy, &query, id).with_context(|| format!("matching document {id}"))?;
            println!("{{ document_id = {id}, status = {status}, words = {} }}", words.join(" "));
        }
        Commands::Dedup => {
            println!("Before duplicates removed: {}", index.document_count());
            let removed = {
                let _timer = LogDuration::new("remove duplicates");
                remove_duplicates(&mut index, policy)
            };
            for id in &removed {
                println!("Found duplicate document id {id}");
            }
            println!("After duplicates removed: {}", index.document_count());
        }
        Commands::Batch { queries } => {
            let queries = input::load_queries(Path::new(&queries))?;
            let results = {
                let _timer = LogDuration::new("process queries");
                process_queries(&index, &queries).context("processing query batch")?
            };
            let mut log = RequestLog::new(&index);
            for (query, docs) in queries.iter().zip(&results) {
                log.record(docs.len());
                println!("{query}:");
                for doc in docs {
                    println!("  {doc}");
                }
            }
            println!("Total empty requests: {}", log.no_result_requests());
        }
    }
    Ok(())
}

fn build_index(args: &IndexArgs) -> Result<InvertedIndex> {
    let _timer = LogDuration::new("build index");
    let stop_words = StopWords::from_text(&args.stop_words).context("parsing --stop-words")?;
    let config = SearchConfig::default().with_max_results(args.max_results).with_shard_count(args.shards);
    let mut index = InvertedIndex::with_config(stop_words, config);

    let docs = input::load_documents(Path::new(&args.input))?;
    let mut skipped = 0usize;
    for doc in docs {
        if let Err(err) = index.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
            if args.strict {
                return Err(err).context("adding document");
            }
            tracing::warn!(id = doc.id, %err, "skipping document");
            skipped += 1;
        }
    }
    tracing::info!(num_docs = index.document_count(), skipped, "ingested documents");
    Ok(index)
}
