/// Default stop words dropped by an `Analyzer` built with [`Analyzer::new`].
///
/// Kept as a small, explicit constant rather than pulled from a larger
/// language word-list crate: spec.md's contract is this exact set, not
/// "whatever English stop words happen to ship in some dictionary."
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "is", "a", "an", "of", "for", "and", "to", "in",
];

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits text on maximal runs of non-word characters, dropping empty
/// fragments. Underscore counts as a word character (spec.md §4.1, §9).
struct Tokenizer<'a> {
    input: &'a [char],
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a [char]) -> Self {
        Self { input }
    }

    fn trim_non_word(&mut self) {
        while !self.input.is_empty() && !is_word_char(self.input[0]) {
            self.input = &self.input[1..];
        }
    }

    fn chop_while<P>(&mut self, mut predicate: P) -> &'a [char]
    where
        P: FnMut(char) -> bool,
    {
        let mut n = 0;
        while n < self.input.len() && predicate(self.input[n]) {
            n += 1;
        }
        let token = &self.input[0..n];
        self.input = &self.input[n..];
        token
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.trim_non_word();
        if self.input.is_empty() {
            return None;
        }
        Some(self.chop_while(is_word_char).iter().collect())
    }
}

/// Deterministic `text -> ordered sequence of normalized terms` pipeline.
///
/// Composes a tokenizer, an ASCII case-folding filter, and a stop-word
/// filter, strictly in that order (spec.md §4.1). Stateless after
/// construction: the same analyzer (or an equivalently configured one) must
/// be used at index time and at query time to get consistent results.
pub struct Analyzer {
    stopwords: Vec<String>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Analyzer {
    /// Builds an analyzer. `stopwords`, when `None`, uses [`DEFAULT_STOPWORDS`].
    pub fn new(stopwords: Option<Vec<String>>) -> Self {
        let stopwords = stopwords.unwrap_or_else(|| {
            DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect()
        });
        let stopwords = stopwords.into_iter().map(|w| w.to_lowercase()).collect();
        Self { stopwords }
    }

    pub fn with_stopwords(stopwords: Vec<String>) -> Self {
        Self::new(Some(stopwords))
    }

    /// Runs the full pipeline: tokenize, lowercase, drop stop words.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        Tokenizer::new(&chars)
            .map(|t| t.to_lowercase())
            .filter(|t| !self.stopwords.contains(t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_word_runs() {
        let a = Analyzer::default();
        assert_eq!(a.analyze("Lucene is powerful"), vec!["lucene", "powerful"]);
    }

    #[test]
    fn underscore_is_a_word_char() {
        let a = Analyzer::default();
        assert_eq!(a.analyze("foo_bar baz"), vec!["foo_bar", "baz"]);
    }

    #[test]
    fn drops_empty_fragments_and_punctuation() {
        let a = Analyzer::default();
        assert_eq!(a.analyze("one,,two...three"), vec!["one", "two", "three"]);
    }

    #[test]
    fn removes_default_stopwords() {
        let a = Analyzer::default();
        assert_eq!(a.analyze("the quick brown fox"), vec!["quick", "brown", "fox"]);
        assert!(a.analyze("the").is_empty());
    }

    #[test]
    fn custom_stopwords() {
        let a = Analyzer::with_stopwords(vec!["quick".to_string()]);
        assert_eq!(a.analyze("the quick brown fox"), vec!["the", "brown", "fox"]);
    }

    #[test]
    fn idempotent_on_already_analyzed_text() {
        let a = Analyzer::default();
        let once = a.analyze("Lucene is a Powerful Search engine");
        let twice = a.analyze(&once.join(" "));
        assert_eq!(once, twice);
    }

    #[test]
    fn deterministic_for_identical_input() {
        let a = Analyzer::default();
        assert_eq!(a.analyze("repeat this text"), a.analyze("repeat this text"));
    }
}
