//! Keyword Filter
//!
//! Answers "does this text contain any of these literal strings" in time
//! proportional to the text length, independent of the keyword count.

use crate::automaton::Automaton;

/// Immutable multi-keyword containment filter.
#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    automaton: Automaton<char>,
    /// Keyword text by pattern id.
    keywords: Vec<String>,
}

impl KeywordFilter {
    /// Build a filter from `keywords`. Empty keywords are ignored and
    /// duplicates collapse to one entry.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut automaton = Automaton::new();
        let mut stored = Vec::new();

        for keyword in keywords {
            let keyword = keyword.as_ref();
            if let Some(id) = automaton.insert(keyword.chars()) {
                if id.index() == stored.len() {
                    stored.push(keyword.to_string());
                }
            }
        }
        automaton.build();

        log::debug!(
            "keyword filter: {} keywords, {} nodes",
            stored.len(),
            automaton.node_count()
        );

        Self {
            automaton,
            keywords: stored,
        }
    }

    /// True if `text` contains any keyword as a literal substring.
    #[inline]
    pub fn contains_any(&self, text: &str) -> bool {
        self.automaton.search(text.chars())
    }

    /// The keyword that ends earliest in `text`, if any.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.automaton
            .find_first(text.chars())
            .map(|id| self.keywords[id.index()].as_str())
    }

    /// Number of distinct non-empty keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn brute_force(keywords: &[String], text: &str) -> bool {
        keywords.iter().any(|k| !k.is_empty() && text.contains(k.as_str()))
    }

    fn random_string(rng: &mut StdRng, alphabet: &[char], max_len: usize) -> String {
        let len = rng.gen_range(0..=max_len);
        (0..len).map(|_| alphabet[rng.gen_range(0..alphabet.len())]).collect()
    }

    #[test]
    fn test_no_keywords() {
        let filter = KeywordFilter::new(Vec::<String>::new());
        assert!(filter.is_empty());
        assert!(!filter.contains_any("trackerhub.com"));
        assert!(!filter.contains_any(""));
    }

    #[test]
    fn test_contains_keyword() {
        let filter = KeywordFilter::new(["tracker", "analytics"]);
        assert!(filter.contains_any("trackerhub.com"));
        assert!(filter.contains_any("cdn.analytics.example.com"));
        assert!(!filter.contains_any("example.com"));
    }

    #[test]
    fn test_overlapping_keywords() {
        let filter = KeywordFilter::new(["ab", "abc"]);
        assert!(filter.contains_any("xabcx"));
        assert_eq!(filter.first_match("xabcx"), Some("ab"));
    }

    #[test]
    fn test_duplicates_and_empty_keywords() {
        let filter = KeywordFilter::new(["ad", "", "ad", "pixel"]);
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.first_match("pixel.ad.net"), Some("pixel"));
        assert!(!filter.contains_any("example.com"));
    }

    #[test]
    fn test_multibyte_text() {
        let filter = KeywordFilter::new(["广告"]);
        assert!(filter.contains_any("www.广告.cn"));
        assert!(!filter.contains_any("www.广.cn"));
    }

    #[test]
    fn test_differential_against_brute_force() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        // A small alphabet forces frequent overlaps and partial matches.
        let alphabet = ['a', 'b', 'c', '.'];

        for _ in 0..2000 {
            let keyword_count = rng.gen_range(0..6);
            let keywords: Vec<String> = (0..keyword_count)
                .map(|_| random_string(&mut rng, &alphabet, 4))
                .collect();
            let filter = KeywordFilter::new(&keywords);

            for _ in 0..10 {
                let text = random_string(&mut rng, &alphabet, 12);
                assert_eq!(
                    filter.contains_any(&text),
                    brute_force(&keywords, &text),
                    "keywords {:?} text {:?}",
                    keywords,
                    text
                );
            }
        }
    }
}
