mod corpus;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use search_core::{
    paginate, process_queries, remove_duplicates, with_status, Document, DocumentStatus,
    ExecutionPolicy, LogDuration, RequestQueue, SearchServer,
};
use tracing_subscriber::{fmt, EnvFilter};

use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Query an in-memory TF-IDF index built from JSON/JSONL documents", long_about = None)]
struct Cli {
    /// Worker threads for parallel operations (defaults to one per core)
    #[arg(long, global = true)]
    threads: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Input path (file or directory of .json / .jsonl documents)
    #[arg(long)]
    input: PathBuf,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank documents for one or more queries
    Query {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Only documents with this status (actual, irrelevant, banned, removed)
        #[arg(long, default_value = "actual")]
        status: DocumentStatus,
        /// Use the parallel ranking path
        #[arg(long, default_value_t = false)]
        parallel: bool,
        /// Print results in pages of this size
        #[arg(long)]
        page_size: Option<usize>,
        /// Emit JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
        queries: Vec<String>,
    },
    /// Show which query words every document matches
    Match {
        #[command(flatten)]
        corpus: CorpusArgs,
        #[arg(long, default_value_t = false)]
        parallel: bool,
        query: String,
    },
    /// Remove documents whose word set repeats an earlier document
    Dedup {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Run every line of a file as a query
    Batch {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// File with one query per line
        #[arg(long)]
        queries: PathBuf,
        /// Fan the queries out over the thread pool
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new().num_threads(threads).build_global()?;
    }

    match cli.command {
        Commands::Query { corpus, status, parallel, page_size, json, queries } => {
            let server = load_server(&corpus)?;
            run_queries(&server, &queries, status, policy(parallel), page_size, json)
        }
        Commands::Match { corpus, parallel, query } => {
            let server = load_server(&corpus)?;
            match_documents(&server, &query, policy(parallel))
        }
        Commands::Dedup { corpus } => {
            let mut server = load_server(&corpus)?;
            let removed = remove_duplicates(&mut server);
            for id in &removed {
                println!("Found duplicate document id {id}");
            }
            println!("{} documents remain", server.document_count());
            Ok(())
        }
        Commands::Batch { corpus, queries, parallel } => {
            let server = load_server(&corpus)?;
            let text = fs::read_to_string(&queries)
                .with_context(|| format!("reading queries from {}", queries.display()))?;
            let queries: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
            run_batch(&server, &queries, parallel)
        }
    }
}

fn policy(parallel: bool) -> ExecutionPolicy {
    if parallel { ExecutionPolicy::Parallel } else { ExecutionPolicy::Sequential }
}

fn load_server(args: &CorpusArgs) -> Result<SearchServer> {
    let _timer = LogDuration::new("load corpus");
    let mut server = SearchServer::from_stop_words_text(&args.stop_words)?;
    tracing::debug!(stop_words = server.stop_words().len(), "engine configured");
    corpus::load(&args.input, &mut server)
        .with_context(|| format!("loading documents from {}", args.input.display()))?;
    Ok(server)
}

fn run_queries(
    server: &SearchServer,
    queries: &[String],
    status: DocumentStatus,
    policy: ExecutionPolicy,
    page_size: Option<usize>,
    json: bool,
) -> Result<()> {
    for query in queries {
        let _timer = LogDuration::new(format!("query {query:?}"));
        let found = server.find_top_documents_policy(policy, query, with_status(status))?;
        if json {
            println!("{}", serde_json::json!({ "query": query, "results": found }));
            continue;
        }
        println!("Search results for: {query}");
        print_documents(&found, page_size)?;
    }
    Ok(())
}

fn print_documents(found: &[Document], page_size: Option<usize>) -> Result<()> {
    match page_size {
        Some(size) => {
            for (n, page) in paginate(found, size)?.into_iter().enumerate() {
                println!("Page {}: {page}", n + 1);
            }
        }
        None => {
            for doc in found {
                println!("{doc}");
            }
        }
    }
    Ok(())
}

fn match_documents(server: &SearchServer, query: &str, policy: ExecutionPolicy) -> Result<()> {
    let _timer = LogDuration::new("match documents");
    println!("Matched documents for: {query}");
    for id in server {
        let (words, status) = server.match_document_policy(policy, query, id)?;
        println!("{{ document_id = {id}, status = {status}, words = {} }}", words.join(" "));
    }
    Ok(())
}

fn run_batch(server: &SearchServer, queries: &[&str], parallel: bool) -> Result<()> {
    let _timer = LogDuration::new("batch");
    if parallel {
        for (query, found) in queries.iter().zip(process_queries(server, queries)?) {
            println!("Search results for: {query}");
            print_documents(&found, None)?;
        }
        return Ok(());
    }

    let mut requests = RequestQueue::new(server);
    for query in queries {
        let found = requests.add_find_request(query)?;
        println!("Search results for: {query}");
        print_documents(&found, None)?;
    }
    tracing::info!(
        total = requests.len(),
        no_result = requests.no_result_requests(),
        "batch complete"
    );
    println!("Requests without results: {}", requests.no_result_requests());
    Ok(())
}
