//! Episode number inference for a batch of file groups.
//!
//! Small batches read the first standalone number out of the stem. Larger
//! batches first drop every token that recurs outside its own group (show
//! title, resolution, release group) and take the first number left over.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::grouper::{FileBatch, FileGroup, SegmentFrequency};

/// Below this many groups the frequency filter has too little signal.
pub const SMALL_BATCH_LIMIT: usize = 3;

// Digits, word boundaries and whitespace are ASCII only: `第01集` has a
// boundary before `0`, and full-width digits never count as a number.
static SEASON_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:(?:\s*-?\s*S[0-9]{2})?E([0-9]))").expect("valid season marker regex")
});

static STANDALONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)([0-9]{1,3})(?-u:\b)").expect("valid number regex"));

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,3}").expect("valid digit regex"));

/// Replace `S01E` / `- S01E` / a bare `E` before a digit with a space.
pub fn clear_season_segment(text: &str) -> String {
    SEASON_MARKER.replace_all(text, " ${1}").into_owned()
}

/// Episode number for every group, in batch order.
pub fn resolve_batch(batch: &FileBatch) -> Vec<(&FileGroup, u32)> {
    let total = batch.group_count();
    batch
        .groups
        .iter()
        .map(|group| {
            let number = resolve_group(group, total, &batch.frequency);
            debug!("Resolved '{}' to episode {}", group.stem, number);
            (group, number)
        })
        .collect()
}

/// Episode number for one group. Falls back to 0 when nothing resolves.
pub fn resolve_group(group: &FileGroup, total_groups: usize, frequency: &SegmentFrequency) -> u32 {
    if total_groups < SMALL_BATCH_LIMIT {
        resolve_small(&group.stem)
    } else {
        resolve_by_frequency(&group.tokens, group.len(), frequency)
    }
}

fn resolve_small(stem: &str) -> u32 {
    let cleared = clear_season_segment(stem);
    STANDALONE_NUMBER
        .captures(&cleared)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn resolve_by_frequency(tokens: &[String], group_size: usize, frequency: &SegmentFrequency) -> u32 {
    tokens
        .iter()
        .filter(|token| frequency.count(token) <= group_size)
        .find_map(|token| {
            let cleared = clear_season_segment(token);
            DIGIT_RUN.find(&cleared).map(|m| parse_numeric_run(m.as_str()))
        })
        .unwrap_or(0)
}

fn parse_numeric_run(run: &str) -> u32 {
    let trimmed = run.trim_start_matches(['0', 'E', 'e']);
    if trimmed.is_empty() {
        0
    } else {
        trimmed.parse().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouper::group_files;

    fn numbers(files: &[&str]) -> Vec<(String, u32)> {
        let batch = group_files(files, "Series");
        resolve_batch(&batch)
            .into_iter()
            .map(|(group, n)| (group.stem.clone(), n))
            .collect()
    }

    #[test]
    fn test_clear_season_segment() {
        assert_eq!(clear_season_segment("Show - S01E05"), "Show 05");
        assert_eq!(clear_season_segment("Show.S02E11"), "Show. 11");
        assert_eq!(clear_season_segment("Show.E01"), "Show. 01");
        assert_eq!(clear_season_segment("Episode"), "Episode");
    }

    #[test]
    fn test_small_batch_inline_markers() {
        assert_eq!(
            numbers(&["Show.E01.mkv", "Show.E02.mkv"]),
            vec![("Show.E01".to_string(), 1), ("Show.E02".to_string(), 2)]
        );
    }

    #[test]
    fn test_small_batch_season_episode_marker() {
        assert_eq!(numbers(&["Show.S01E07.1080p.mkv"]), vec![("Show.S01E07.1080p".to_string(), 7)]);
    }

    #[test]
    fn test_small_batch_skips_long_numbers() {
        assert_eq!(numbers(&["Show.1080p.12.mkv"]), vec![("Show.1080p.12".to_string(), 12)]);
    }

    #[test]
    fn test_large_batch_excludes_shared_tokens() {
        let files = [
            "Show.1080p.01.mkv",
            "Show.1080p.02.mkv",
            "Show.1080p.03.mkv",
            "Show.1080p.04.mkv",
            "Show.1080p.05.mkv",
        ];
        let batch = group_files(files, "Series");
        assert_eq!(batch.frequency.count("1080p"), 5);

        let resolved: Vec<u32> = resolve_batch(&batch).into_iter().map(|(_, n)| n).collect();
        assert_eq!(resolved, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_large_batch_with_subtitles() {
        let files = [
            "[Grp] Show - 01 [720p].mkv",
            "[Grp] Show - 01 [720p].chs.ass",
            "[Grp] Show - 02 [720p].mkv",
            "[Grp] Show - 02 [720p].chs.ass",
            "[Grp] Show - 10 [720p].mkv",
        ];
        let resolved: Vec<u32> = numbers(&files).into_iter().map(|(_, n)| n).collect();
        assert_eq!(resolved, vec![1, 2, 10]);
    }

    #[test]
    fn test_large_batch_season_episode_tokens() {
        let files = ["Show.S01E01.mkv", "Show.S01E02.mkv", "Show.S01E03.mkv"];
        let resolved: Vec<u32> = numbers(&files).into_iter().map(|(_, n)| n).collect();
        assert_eq!(resolved, vec![1, 2, 3]);
    }

    #[test]
    fn test_token_shared_by_every_group_never_selected() {
        // "720" is in every group; the per-group marker wins even though it comes later.
        let files = ["720.a.x1.mkv", "720.b.x2.mkv", "720.c.x3.mkv", "720.d.x4.mkv"];
        let resolved: Vec<u32> = numbers(&files).into_iter().map(|(_, n)| n).collect();
        assert_eq!(resolved, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_zero_run_parses_to_zero() {
        assert_eq!(parse_numeric_run("000"), 0);
        assert_eq!(parse_numeric_run("007"), 7);
        assert_eq!(parse_numeric_run("120"), 120);
    }

    #[test]
    fn test_small_batch_cjk_episode_markers() {
        assert_eq!(
            numbers(&["某剧 第01集.mkv", "某剧 第02集.mkv"]),
            vec![("某剧 第01集".to_string(), 1), ("某剧 第02集".to_string(), 2)]
        );
    }

    #[test]
    fn test_large_batch_skips_full_width_digits() {
        let files = ["Show.０１.01.mkv", "Show.０２.02.mkv", "Show.０３.03.mkv"];
        let resolved: Vec<u32> = numbers(&files).into_iter().map(|(_, n)| n).collect();
        assert_eq!(resolved, vec![1, 2, 3]);
    }

    #[test]
    fn test_season_marker_keeps_full_width_space() {
        assert_eq!(clear_season_segment("Show\u{3000}S01E05"), "Show\u{3000} 05");
    }

    // Known edge case: unresolved groups all collapse onto episode 0.
    #[test]
    fn test_unresolved_groups_fall_back_to_zero() {
        let files = ["Show.alpha.mkv", "Show.beta.mkv", "Show.gamma.mkv"];
        let resolved: Vec<u32> = numbers(&files).into_iter().map(|(_, n)| n).collect();
        assert_eq!(resolved, vec![0, 0, 0]);

        assert_eq!(numbers(&["Show.mkv"]), vec![("Show".to_string(), 0)]);
    }
}
