//! Definitions for the technical terms used in stage text.

/// A technical term and its one-line definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlossaryEntry {
    /// The term as it is usually written.
    pub term: &'static str,
    /// Plain-English definition.
    pub definition: &'static str,
}

/// Every known term.
pub static GLOSSARY: [GlossaryEntry; 8] = [
    GlossaryEntry {
        term: "convolutional",
        definition: "A layer that applies filters to detect features in images",
    },
    GlossaryEntry {
        term: "pooling",
        definition: "Reduces spatial dimensions while retaining important features",
    },
    GlossaryEntry {
        term: "ReLU",
        definition: "Rectified Linear Unit: activation function that outputs max(0, x)",
    },
    GlossaryEntry {
        term: "softmax",
        definition: "Converts raw scores into probabilities that sum to 1",
    },
    GlossaryEntry {
        term: "stride",
        definition: "Number of pixels the filter moves at each step",
    },
    GlossaryEntry {
        term: "kernel",
        definition: "Small matrix of weights used to detect patterns",
    },
    GlossaryEntry {
        term: "feature map",
        definition: "Output of a convolutional layer showing detected features",
    },
    GlossaryEntry {
        term: "fully connected",
        definition: "Layer where every neuron connects to every neuron in previous layer",
    },
];

/// Look up a term, ignoring ASCII case.
pub fn lookup(term: &str) -> Option<&'static GlossaryEntry> {
    GLOSSARY
        .iter()
        .find(|entry| entry.term.eq_ignore_ascii_case(term.trim()))
}

/// Terms that occur in `text` as whole words, in glossary order.
pub fn find_terms(text: &str) -> Vec<&'static GlossaryEntry> {
    let haystack = text.to_ascii_lowercase();
    GLOSSARY
        .iter()
        .filter(|entry| contains_word(&haystack, &entry.term.to_ascii_lowercase()))
        .collect()
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

// ASCII lowercasing keeps byte offsets stable, so boundaries can be checked
// on the raw bytes.
fn contains_word(haystack: &str, needle: &str) -> bool {
    let bytes = haystack.as_bytes();
    haystack.match_indices(needle).any(|(start, matched)| {
        let end = start + matched.len();
        let before_ok = start == 0 || !is_word_byte(bytes[start - 1]);
        let after_ok = end == bytes.len() || !is_word_byte(bytes[end]);
        before_ok && after_ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("relu").map(|e| e.term), Some("ReLU"));
        assert_eq!(lookup(" Feature Map ").map(|e| e.term), Some("feature map"));
        assert!(lookup("dropout").is_none());
    }

    #[test]
    fn test_find_terms_matches_whole_words_only() {
        let terms: Vec<_> = find_terms("Apply ReLU after the Convolutional layer")
            .iter()
            .map(|e| e.term)
            .collect();
        assert_eq!(terms, vec!["convolutional", "ReLU"]);

        // "strides" is not the word "stride"
        assert!(find_terms("large strides").is_empty());
    }

    #[test]
    fn test_find_terms_handles_multi_word_terms() {
        let terms: Vec<_> = find_terms("Each feature map feeds a fully connected layer.")
            .iter()
            .map(|e| e.term)
            .collect();
        assert_eq!(terms, vec!["feature map", "fully connected"]);
    }
}
