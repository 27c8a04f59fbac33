use std::collections::{BTreeSet, HashMap};

/// Fitted TF-IDF vocabulary over unigrams and bigrams.
///
/// Terms are stored in lexicographic order; `idf` is aligned with `terms`.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl Vocabulary {
    /// Fits the vocabulary with smoothed idf: `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|doc| ngrams(doc.as_ref())).collect();

        let terms: Vec<String> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        let mut doc_freq = vec![0usize; terms.len()];
        for grams in &tokenized {
            let unique: BTreeSet<&String> = grams.iter().collect();
            for gram in unique {
                if let Some(&idx) = index.get(gram) {
                    doc_freq[idx] += 1;
                }
            }
        }

        let n_docs = documents.len() as f64;
        let idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Self { terms, index, idf }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term(&self, idx: usize) -> Option<&str> {
        self.terms.get(idx).map(String::as_str)
    }

    /// L2-normalized tf-idf weights of `text`; out-of-vocabulary grams are dropped.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut weights = vec![0.0; self.terms.len()];
        for gram in ngrams(text) {
            if let Some(&idx) = self.index.get(&gram) {
                weights[idx] += 1.0;
            }
        }
        for (weight, idf) in weights.iter_mut().zip(&self.idf) {
            *weight *= idf;
        }

        let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in weights.iter_mut() {
                *weight /= norm;
            }
        }
        weights
    }

    pub fn transform_all<S: AsRef<str>>(&self, documents: &[S]) -> Vec<Vec<f64>> {
        documents.iter().map(|doc| self.transform(doc.as_ref())).collect()
    }
}

/// Lowercased word tokens of two or more word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

fn ngrams(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let mut grams = tokens.clone();
    grams.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    grams
}
