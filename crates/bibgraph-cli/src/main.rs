use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use bibgraph_keywords::KeywordDocument;

/// Generate publication keyword JSON for the knowledge-graph view from a
/// BibTeX bibliography.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the BibTeX bibliography to read
    #[arg(long, default_value = "Marcos.bib")]
    bib: PathBuf,

    /// Path to write the keyword JSON document
    #[arg(long, default_value = "data/publications_keywords.json")]
    out: PathBuf,

    /// Minimum global frequency for a keyword to stay in a publication's list
    #[arg(long, default_value_t = 1)]
    min_freq: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.bib.exists() {
        anyhow::bail!("Bib file not found: {}", cli.bib.display());
    }

    let text = bibgraph_bib::read_bib_file(&cli.bib)
        .with_context(|| format!("failed to read {}", cli.bib.display()))?;

    let source = cli.bib.display().to_string();
    let (document, stats) = bibgraph_keywords::build_document(&text, &source, cli.min_freq);

    write_document(&cli.out, &document)
        .with_context(|| format!("failed to write {}", cli.out.display()))?;

    println!(
        "Wrote {} with {} publications and {} unique keywords.",
        cli.out.display(),
        document.total_publications,
        stats.unique_keywords,
    );

    Ok(())
}

/// Serialize and write the document, all-or-nothing.
///
/// Writes into a temp file in the destination directory and persists it
/// over the final path, so a failed run never leaves a partial file.
fn write_document(path: &Path, document: &KeywordDocument) -> anyhow::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent)?;

    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');

    let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
    tmp.write_all(json.as_bytes())?;
    tmp.persist(path)?;
    Ok(())
}
