use regex::Regex;
use std::sync::LazyLock;

static DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:[\s\[\]()_\-.Ee])+").expect("valid delimiter regex"));

/// Split a filename stem into tokens.
///
/// Splits on whitespace, brackets, parentheses, `_`, `-`, `.` and the letter
/// `E` in either case, so inline markers like `E05` leave a bare `05` behind.
/// Order is preserved and empty segments are dropped.
pub fn tokenize(stem: &str) -> Vec<String> {
    DELIMITERS
        .split(stem)
        .filter(|segment| !segment.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stem() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("..__--").is_empty());
    }

    #[test]
    fn test_splits_on_delimiters() {
        assert_eq!(
            tokenize("[Group] Show_Name - 05 (1080p)"),
            vec!["Group", "Show", "Nam", "05", "1080p"]
        );
    }

    #[test]
    fn test_episode_marker_split() {
        assert_eq!(tokenize("Show.S01E05"), vec!["Show", "S01", "05"]);
        assert_eq!(tokenize("Show.E01"), vec!["Show", "01"]);
    }

    #[test]
    fn test_tokens_are_ordered_subsequence() {
        let stem = "My.Show.2019.S02E11.720p_WEB";
        let tokens = tokenize(stem);

        let mut rest = stem;
        for token in &tokens {
            let pos = rest.find(token.as_str()).expect("token comes from the stem");
            rest = &rest[pos + token.len()..];
        }
        assert!(tokens.iter().all(|t| !t.is_empty()));
    }
}
