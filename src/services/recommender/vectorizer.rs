use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use super::stop_words::is_stop_word;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"(?u)\b\w\w+\b").expect("valid regex");
}

/// Lowercases `text` and splits it into tokens of two or more word characters,
/// dropping English stop words.
pub fn analyze(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Sparse row of `(term id, weight)` pairs sorted by term id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f64)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }
}

/// TF-IDF vectorizer with a capped vocabulary
///
/// Vocabulary keeps the `max_features` terms with the highest document frequency
/// (ties broken alphabetically), then assigns ids in alphabetical order. Weights are
/// `count * (ln((1 + n) / (1 + df)) + 1)` and every row is L2-normalised.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    vocabulary: HashMap<String, u32>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_id(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_id(term).map(|id| self.idf[id as usize])
    }

    /// Learns vocabulary and idf from `documents` and returns one row per document
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Vec<SparseVector> {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| analyze(d.as_ref())).collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = doc_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);
        ranked.sort_by(|a, b| a.0.cmp(b.0));

        let n = documents.len() as f64;
        self.vocabulary = HashMap::with_capacity(ranked.len());
        self.idf = Vec::with_capacity(ranked.len());
        for (id, (term, df)) in ranked.into_iter().enumerate() {
            self.vocabulary.insert(term.to_string(), id as u32);
            self.idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        tokenized.iter().map(|tokens| self.weigh(tokens)).collect()
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<u32, f64> = HashMap::new();
        for token in tokens {
            if let Some(&id) = self.vocabulary.get(token) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(u32, f64)> = counts
            .into_iter()
            .map(|(id, count)| (id, count * self.idf[id as usize]))
            .collect();
        entries.sort_by_key(|(id, _)| *id);

        let mut row = SparseVector { entries };
        let norm = row.norm();
        if norm > 0.0 {
            for (_, w) in row.entries.iter_mut() {
                *w /= norm;
            }
        }
        row
    }
}
