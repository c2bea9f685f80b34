use std::collections::HashMap;

use crate::analyzer::Analyzer;
use crate::query::{Operator, Query};
use crate::reader::IndexReader;

/// Evaluates boolean term queries against an [`IndexReader`] and ranks
/// matches (spec.md §4.6).
///
/// The analyzer passed here must be the same one (or an equivalently
/// configured one) used at index time, so that query terms normalize the
/// same way indexed terms did.
pub struct Searcher<'a> {
    reader: &'a IndexReader,
    analyzer: &'a Analyzer,
}

impl<'a> Searcher<'a> {
    pub fn new(reader: &'a IndexReader, analyzer: &'a Analyzer) -> Self {
        Self { reader, analyzer }
    }

    /// Normalizes `query.terms` through the analyzer, scores and ranks
    /// candidates, then applies the boolean filter. Returns `(doc_id,
    /// score)` pairs sorted by descending score, ties broken by ascending
    /// `doc_id`.
    ///
    /// Duplicate normalized terms contribute additively (the reference
    /// engine does not deduplicate them). An empty normalized term list
    /// (e.g. a query made entirely of stop words) returns an empty result,
    /// not an error (spec.md §7).
    pub fn search_with_scores(&self, query: &Query) -> Vec<(String, f64)> {
        let normalized_terms: Vec<String> = query
            .terms
            .iter()
            .flat_map(|t| self.analyzer.analyze(t))
            .collect();

        if normalized_terms.is_empty() {
            return Vec::new();
        }

        let total_docs = self.reader.total_doc_count() as f64;
        let mut scores: HashMap<String, f64> = HashMap::new();
        let mut postings_by_term: Vec<HashMap<String, Vec<u64>>> = Vec::new();

        for term in &normalized_terms {
            let postings = self.reader.terms_docs(term);
            if !postings.is_empty() {
                let df = self.reader.doc_freq(term) as f64;
                let idf = 1.0 + (total_docs - df + 0.5) / (df + 0.5);
                for (doc_id, positions) in &postings {
                    let tf = positions.len() as f64;
                    *scores.entry(doc_id.clone()).or_insert(0.0) += tf * idf;
                }
            }
            postings_by_term.push(postings);
        }

        let mut doc_ids: Vec<String> = scores.keys().cloned().collect();

        if query.operator == Operator::And {
            doc_ids.retain(|doc_id| {
                postings_by_term
                    .iter()
                    .all(|postings| postings.contains_key(doc_id))
            });
        }

        let mut results: Vec<(String, f64)> = doc_ids
            .into_iter()
            .map(|doc_id| {
                let score = scores[&doc_id];
                (doc_id, score)
            })
            .collect();

        results.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        results
    }

    /// Projection of [`Self::search_with_scores`] onto just the doc ids.
    pub fn search(&self, query: &Query) -> Vec<String> {
        self.search_with_scores(query)
            .into_iter()
            .map(|(doc_id, _)| doc_id)
            .collect()
    }
}
