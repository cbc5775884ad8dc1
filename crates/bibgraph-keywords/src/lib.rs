use std::collections::HashMap;

use serde::Serialize;

pub mod extract;
pub mod tables;

pub use extract::extract_keywords;

/// One publication with its derived keyword list.
///
/// Keywords are ordered: phrase keywords in table scan order, then
/// residual tokens sorted lexicographically, deduplicated within the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publication {
    pub title: String,
    pub keywords: Vec<String>,
}

/// Terminal artifact consumed by the knowledge-graph view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDocument {
    pub publications: Vec<Publication>,
    pub generated_from: String,
    pub total_publications: usize,
}

/// Tallies from one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Raw records produced by segmentation.
    pub entries: usize,
    /// Records skipped for lack of a usable title.
    pub no_title: usize,
    /// Distinct keywords across the corpus, counted before filtering.
    pub unique_keywords: usize,
}

/// Count, for each keyword, the number of publications whose keyword list
/// contains it. Per-publication lists are deduplicated by construction, so
/// occurrence count and containment count coincide.
pub fn aggregate_frequencies(publications: &[Publication]) -> HashMap<String, usize> {
    let mut freq: HashMap<String, usize> = HashMap::new();
    for publication in publications {
        for keyword in &publication.keywords {
            *freq.entry(keyword.clone()).or_insert(0) += 1;
        }
    }
    freq
}

/// Drop keywords below the global frequency floor from each publication.
///
/// The frequency map itself is left untouched; it reflects pre-filter
/// counts.
pub fn apply_frequency_floor(
    publications: &mut [Publication],
    freq: &HashMap<String, usize>,
    min_freq: usize,
) {
    for publication in publications.iter_mut() {
        publication
            .keywords
            .retain(|k| freq.get(k).copied().unwrap_or(0) >= min_freq);
    }
}

/// Run the full pipeline over raw bibliography text.
///
/// Segments `text` into records, extracts and normalizes each title,
/// derives keyword lists, aggregates corpus-wide frequencies, and (for
/// `min_freq > 1`) drops per-publication keywords below the floor.
/// Records without a usable title are skipped, not errors.
pub fn build_document(text: &str, source: &str, min_freq: usize) -> (KeywordDocument, PipelineStats) {
    let mut stats = PipelineStats::default();
    let mut publications = Vec::new();

    for entry in bibgraph_bib::segment_entries(text) {
        stats.entries += 1;
        let title = match bibgraph_bib::extract_title(&entry) {
            Some(t) if !t.is_empty() => t,
            _ => {
                stats.no_title += 1;
                tracing::debug!(
                    entry = entry.lines().next().unwrap_or_default(),
                    "skipping record without title"
                );
                continue;
            }
        };
        let keywords = extract_keywords(&title);
        publications.push(Publication { title, keywords });
    }

    let freq = aggregate_frequencies(&publications);
    stats.unique_keywords = freq.len();

    if min_freq > 1 {
        apply_frequency_floor(&mut publications, &freq, min_freq);
    }

    tracing::debug!(
        entries = stats.entries,
        publications = publications.len(),
        skipped = stats.no_title,
        unique_keywords = stats.unique_keywords,
        "pipeline complete"
    );

    let total_publications = publications.len();
    let document = KeywordDocument {
        publications,
        generated_from: source.to_string(),
        total_publications,
    };
    (document, stats)
}
