//! Naive textual segmentation.

use crate::domain::Segment;

/// Split `text` on every literal occurrence of `delimiter`.
///
/// The fragment before the first occurrence is dropped and every remaining
/// fragment is trimmed. The split is not parse-aware: a delimiter inside a
/// function body, a string or a comment starts a new segment.
pub fn split_on_delimiter(text: &str, delimiter: &str) -> Vec<Segment> {
    if delimiter.is_empty() {
        return Vec::new();
    }

    text.split(delimiter)
        .skip(1)
        .enumerate()
        .map(|(ordinal, fragment)| Segment { ordinal, text: fragment.trim().to_string() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::split_on_delimiter;

    fn texts(text: &str, delimiter: &str) -> Vec<String> {
        split_on_delimiter(text, delimiter).into_iter().map(|s| s.text).collect()
    }

    #[test]
    fn no_delimiter_yields_nothing() {
        assert!(texts("import os\nx = 1\n", "def ").is_empty());
        assert!(texts("", "def ").is_empty());
    }

    #[test]
    fn preamble_is_discarded_and_fragments_trimmed() {
        let source = "import os\ndef a():\n    pass\ndef b():\n    pass\n";
        assert_eq!(texts(source, "def "), vec!["a():\n    pass", "b():\n    pass"]);
    }

    #[test]
    fn one_segment_per_occurrence_in_order() {
        let source = "def a(): pass\n\n\ndef b(): pass\ndef c(): pass";
        let segments = split_on_delimiter(source, "def ");
        assert_eq!(segments.len(), 3);
        let ordinals: Vec<usize> = segments.iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
        assert_eq!(segments[2].text, "c(): pass");
    }

    #[test]
    fn nested_delimiter_splits_enclosing_function() {
        let source = "def outer():\n    def inner():\n        pass\n";
        assert_eq!(texts(source, "def "), vec!["outer():", "inner():\n        pass"]);
    }

    #[test]
    fn delimiter_inside_string_still_splits() {
        let source = "def a():\n    return \"undef x\"\n";
        assert_eq!(texts(source, "def "), vec!["a():\n    return \"un", "x\""]);
    }

    #[test]
    fn custom_delimiter() {
        let source = "use std::io;\nfn a() {}\nfn b() {}\n";
        assert_eq!(texts(source, "fn "), vec!["a() {}", "b() {}"]);
    }
}
