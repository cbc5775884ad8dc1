//! Curated taxonomy tables.
//!
//! Hand-maintained data: edit here to tune the taxonomy. The phrase list is
//! scanned in order, so related variants should stay adjacent.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Domain phrases matched as case-insensitive literal substrings of a
/// title, in scan order. Singular and plural variants are listed
/// separately and merged by [`CANONICAL`].
pub static PHRASES: &[&str] = &[
    "knowledge graph",
    "knowledge graphs",
    "clinical guideline",
    "clinical guidelines",
    "semantic web",
    "semantic change",
    "machine learning",
    "data sharing",
    "explainable ai",
    "hybrid ai",
    "ontology",
    "ontologies",
    "mapping",
    "mappings",
    "recommendation",
    "recommendations",
    "e-health",
    "ehealth",
];

/// Singular/plural and spelling variants merged into one display label.
pub static CANONICAL: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("knowledge graphs", "Knowledge Graphs"),
        ("knowledge graph", "Knowledge Graphs"),
        ("clinical guidelines", "Clinical Guidelines"),
        ("clinical guideline", "Clinical Guidelines"),
        ("semantic web", "Semantic Web"),
        ("semantic change", "Semantic Change"),
        ("machine learning", "Machine Learning"),
        ("data sharing", "Data Sharing"),
        ("explainable ai", "Explainable AI"),
        ("hybrid ai", "Hybrid AI"),
        ("ontologies", "Ontology"),
        ("ontology", "Ontology"),
        ("mappings", "Mapping"),
        ("mapping", "Mapping"),
        ("recommendations", "Recommendation"),
        ("recommendation", "Recommendation"),
        ("e-health", "eHealth"),
        ("ehealth", "eHealth"),
    ]
    .into_iter()
    .collect()
});

/// Function words and generic academic filler dropped from residual tokens.
pub static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the",
        "and",
        "for",
        "with",
        "into",
        "over",
        "from",
        "using",
        "via",
        "a",
        "an",
        "of",
        "on",
        "in",
        "to",
        "by",
        "be",
        "based",
        "towards",
        "toward",
        "under",
        "between",
        "their",
        "within",
        "case",
        "study",
        "short",
        "paper",
        "approach",
        "method",
        "system",
        "framework",
        "platform",
        "model",
        "models",
        "multi",
        "multi-level",
        "level",
        "evaluation",
        "analysis",
        "support",
        "maintenance",
        "adaptive",
        "dynamic",
        "evolving",
        "internal",
        "external",
        "generalizing",
        "general",
        "generalized",
        "combining",
        "construction",
        "exploitation",
        "driven",
        "formal",
        "formalizing",
        "formalisation",
        "impact",
    ]
    .into_iter()
    .collect()
});
