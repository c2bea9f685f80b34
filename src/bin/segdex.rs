use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use indicatif::ProgressBar;

use segdex::document::{Document, Field};
use segdex::query::{Operator, Query};
use segdex::{Analyzer, IndexMerger, IndexReader, IndexWriter, Searcher};

/// Minimal CLI over the segdex core library.
///
/// Indexing here only reads plain-text files (`.txt`, `.md`) — extracting
/// text out of richer formats (HTML, PDF, ...) is the job of a dedicated
/// ingestion driver, which is out of scope for this crate. This binary
/// exists to exercise `IndexWriter`/`IndexReader`/`Searcher`/`IndexMerger`
/// end to end, not to be a production ingestion pipeline or web front end.
#[derive(Parser, Debug)]
#[command(name = "segdex", about = "A miniature segmented search engine", version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Index every plain-text file under a directory.
    Index {
        #[arg(short = 'p', long = "path", help = "Directory to index")]
        path: PathBuf,
        #[arg(short = 'i', long = "index", help = "Index directory")]
        index_dir: PathBuf,
    },
    /// Run a boolean term query against an index.
    Search {
        #[arg(short = 'i', long = "index", help = "Index directory")]
        index_dir: PathBuf,
        #[arg(short = 'q', long = "query", help = "Whitespace-separated query terms")]
        query: String,
        #[arg(short = 'a', long = "and", help = "Require every term (default OR)")]
        and: bool,
        #[arg(short = 'c', long = "count", help = "Max results to print")]
        count: Option<usize>,
    },
    /// Compact every segment in an index into one.
    Merge {
        #[arg(short = 'i', long = "index", help = "Index directory")]
        index_dir: PathBuf,
        #[arg(long = "name", help = "Name for the merged segment")]
        name: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Index { path, index_dir } => index_directory(&path, &index_dir),
        Commands::Search {
            index_dir,
            query,
            and,
            count,
        } => search(&index_dir, &query, and, count),
        Commands::Merge { index_dir, name } => {
            IndexMerger::open(&index_dir)
                .merge_all(name.as_deref())
                .context("merge_all")
        }
    }
}

fn index_directory(path: &Path, index_dir: &Path) -> anyhow::Result<()> {
    println!("Indexing documents...");
    let files = collect_text_files(path)?;
    let bar = ProgressBar::new(files.len() as u64);

    let mut writer =
        IndexWriter::open(index_dir, Analyzer::default()).context("open writer")?;

    let mut indexed = 0u64;
    let mut skipped = 0u64;
    for file in &files {
        bar.inc(1);
        match fs::read_to_string(file) {
            Ok(content) if !content.trim().is_empty() => {
                let doc_id = file.to_string_lossy().to_string();
                let mut doc = Document::new(doc_id.clone());
                doc.add_field(Field::keyword("path", doc_id));
                doc.add_field(Field::text("content", content));
                writer.add_document(&doc);
                indexed += 1;
            }
            _ => skipped += 1,
        }
    }
    bar.finish();

    writer.commit().context("commit")?;
    println!("Indexed {indexed} files, skipped {skipped}");
    Ok(())
}

fn collect_text_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if root.is_dir() {
        for entry in fs::read_dir(root).with_context(|| format!("reading {}", root.display()))? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_text_files(&path)?);
            } else if matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("txt") | Some("md")
            ) {
                files.push(path);
            }
        }
    } else {
        files.push(root.to_path_buf());
    }
    Ok(files)
}

fn search(index_dir: &Path, query: &str, and: bool, count: Option<usize>) -> anyhow::Result<()> {
    let analyzer = Analyzer::default();
    let reader = IndexReader::open(index_dir).context("open reader")?;
    let searcher = Searcher::new(&reader, &analyzer);

    let operator = if and { Operator::And } else { Operator::Or };
    let terms: Vec<String> = query.split_whitespace().map(str::to_string).collect();
    let mut results = searcher.search_with_scores(&Query::new(terms, operator));

    if results.is_empty() {
        eprintln!("Zero results");
        return Ok(());
    }

    if let Some(count) = count {
        results.truncate(count);
    }

    for (doc_id, score) in results {
        println!("{score:.4}\t{doc_id}");
    }
    Ok(())
}
