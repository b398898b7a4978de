use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{info, warn};

use crate::grouper::{FileBatch, FileEntry};
use crate::resolver::resolve_batch;

/// Episode number → display name for one season.
pub type EpisodeMap = BTreeMap<u32, String>;

static LANGUAGE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(chs|cht|zh|en|jp|jpn|eng|other)\.").expect("valid language tag regex")
});

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid markup regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    Unchanged,
    DestinationExists,
    SourceMissing,
    Failed,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenameSummary {
    pub renamed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RenameSummary {
    fn record(&mut self, outcome: RenameOutcome) {
        match outcome {
            RenameOutcome::Renamed => self.renamed += 1,
            RenameOutcome::Unchanged => self.unchanged += 1,
            RenameOutcome::DestinationExists | RenameOutcome::SourceMissing => self.skipped += 1,
            RenameOutcome::Failed => self.failed += 1,
        }
    }
}

/// Build the target filename for one file of a group resolved to `episode`.
pub fn target_filename(entry: &FileEntry, episode: u32, episodes: &EpisodeMap) -> String {
    let mut name = episodes
        .get(&episode)
        .cloned()
        .unwrap_or_else(|| episode.to_string());

    match LANGUAGE_TAG.find(&entry.filename) {
        Some(tag) if entry.is_subtitle() => {
            name.push_str(tag.as_str());
            name.push_str(&entry.extension);
        }
        _ => {
            name.push('.');
            name.push_str(&entry.extension);
        }
    }

    sanitize_filename(&name)
}

/// Strip markup and path components so the name stays inside the season folder.
pub fn sanitize_filename(name: &str) -> String {
    let stripped = MARKUP_TAG.replace_all(name, "");
    let cleaned = clean_path(&stripped);
    cleaned.replace('/', " ")
}

fn clean_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches(['\\', '/']);
    let without_traversal = trimmed.replace("../", "").replace("..\\", "");
    if without_traversal == ".." {
        return String::new();
    }
    without_traversal.replace('\\', "/")
}

/// Rename `origin` to `target` unless the target exists or the origin is gone.
pub fn safe_rename(origin: &Path, target: &Path) -> RenameOutcome {
    info!("Renaming: {} -> {}", origin.display(), target.display());

    if target.exists() {
        return RenameOutcome::DestinationExists;
    }
    if !origin.exists() {
        return RenameOutcome::SourceMissing;
    }

    match std::fs::rename(origin, target) {
        Ok(_) => RenameOutcome::Renamed,
        Err(e) => {
            warn!("Rename failed for {}: {}", origin.display(), e);
            RenameOutcome::Failed
        }
    }
}

/// Resolve every group in the batch and rename its files inside `dir`.
pub fn rename_batch(dir: &Path, batch: &FileBatch, episodes: &EpisodeMap) -> RenameSummary {
    let mut summary = RenameSummary::default();

    for (group, episode) in resolve_batch(batch) {
        for entry in &group.entries {
            let new_name = target_filename(entry, episode, episodes);
            if entry.filename.to_lowercase() == new_name.to_lowercase() {
                summary.record(RenameOutcome::Unchanged);
                continue;
            }

            let outcome = safe_rename(&dir.join(&entry.filename), &dir.join(&new_name));
            summary.record(outcome);
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(filename: &str) -> FileEntry {
        let (_, extension) = crate::grouper::split_extension(filename);
        FileEntry {
            filename: filename.to_string(),
            extension: extension.to_string(),
        }
    }

    fn pilot_map() -> EpisodeMap {
        let mut episodes = EpisodeMap::new();
        episodes.insert(1, "Series - S01E01 - Pilot".to_string());
        episodes
    }

    #[test]
    fn test_subtitle_keeps_language_tag() {
        assert_eq!(
            target_filename(&entry("Show.01.chs.srt"), 1, &pilot_map()),
            "Series - S01E01 - Pilot.chs.srt"
        );
    }

    #[test]
    fn test_subtitle_without_tag() {
        assert_eq!(
            target_filename(&entry("Show.01.ass"), 1, &pilot_map()),
            "Series - S01E01 - Pilot.ass"
        );
    }

    #[test]
    fn test_video_ignores_language_tag() {
        assert_eq!(
            target_filename(&entry("Show.en.01.mkv"), 1, &pilot_map()),
            "Series - S01E01 - Pilot.mkv"
        );
    }

    #[test]
    fn test_missing_episode_uses_number() {
        assert_eq!(target_filename(&entry("Show.07.mp4"), 7, &pilot_map()), "7.mp4");
        assert_eq!(target_filename(&entry("Show.x.mkv"), 0, &pilot_map()), "0.mkv");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("<i>Pilot</i>.mkv"), "Pilot.mkv");
        assert_eq!(sanitize_filename("/Show - S01E01 - A/B.mkv"), "Show - S01E01 - A B.mkv");
        assert_eq!(sanitize_filename("../../etc.mkv"), "etc.mkv");
        assert_eq!(sanitize_filename("a\\b.mkv"), "a b.mkv");
        assert_eq!(sanitize_filename(".."), "");
    }
}
