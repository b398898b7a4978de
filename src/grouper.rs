use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

use crate::tokenizer::tokenize;

/// Extensions picked up from a season folder.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["mp4", "mkv", "srt", "ass"];

pub const SUBTITLE_EXTENSIONS: [&str; 2] = ["srt", "ass"];

/// Subtitle language tags recognised between the stem and the extension.
pub const LANGUAGE_TAGS: [&str; 8] = ["chs", "cht", "zh", "en", "jp", "jpn", "eng", "other"];

static ORGANIZED_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ - S[0-9]{2}E[0-9]{2} - ").expect("valid organized regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub filename: String,
    pub extension: String,
}

impl FileEntry {
    pub fn is_subtitle(&self) -> bool {
        is_subtitle_extension(&self.extension)
    }
}

/// Files sharing one stem, e.g. a video and its subtitles.
#[derive(Debug, Clone)]
pub struct FileGroup {
    pub stem: String,
    pub entries: Vec<FileEntry>,
    pub tokens: Vec<String>,
}

impl FileGroup {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Token occurrence counts across a batch, counted per file.
#[derive(Debug, Default, Clone)]
pub struct SegmentFrequency {
    counts: HashMap<String, usize>,
}

impl SegmentFrequency {
    pub fn record(&mut self, tokens: &[String]) {
        for token in tokens {
            *self.counts.entry(token.clone()).or_insert(0) += 1;
        }
    }

    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }
}

/// Result of scanning one season folder.
#[derive(Debug, Default)]
pub struct FileBatch {
    pub groups: Vec<FileGroup>,
    pub frequency: SegmentFrequency,
}

impl FileBatch {
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group(&self, stem: &str) -> Option<&FileGroup> {
        self.groups.iter().find(|g| g.stem == stem)
    }
}

pub fn is_subtitle_extension(extension: &str) -> bool {
    SUBTITLE_EXTENSIONS.contains(&extension)
}

/// Check whether a filename already follows `<title> - S##E## - `.
pub fn is_organized_filename(filename: &str, title: &str) -> bool {
    filename
        .strip_prefix(title)
        .map(|rest| ORGANIZED_SUFFIX.is_match(rest))
        .unwrap_or(false)
}

/// Split off the final extension. Names without a dot have an empty extension.
pub fn split_extension(filename: &str) -> (&str, &str) {
    filename.rsplit_once('.').unwrap_or((filename, ""))
}

/// Stem used for grouping: the final extension is removed, and for subtitles a
/// trailing language tag as well, so `ep.en.srt` groups with `ep.mkv`.
pub fn file_stem(filename: &str) -> &str {
    let (stem, extension) = split_extension(filename);
    if !is_subtitle_extension(extension) {
        return stem;
    }

    match stem.rsplit_once('.') {
        Some((inner, tag)) if LANGUAGE_TAGS.contains(&tag) => inner,
        _ => stem,
    }
}

/// Group a directory listing by stem, skipping unsupported and already organized files.
pub fn group_files<I, S>(filenames: I, title: &str) -> FileBatch
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut batch = FileBatch::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for filename in filenames {
        let filename = filename.as_ref();
        let (_, extension) = split_extension(filename);

        if !SUPPORTED_EXTENSIONS.contains(&extension) {
            continue;
        }
        if is_organized_filename(filename, title) {
            debug!("Already organized, skipping: {}", filename);
            continue;
        }

        let stem = file_stem(filename);
        let tokens = tokenize(stem);
        batch.frequency.record(&tokens);

        let entry = FileEntry {
            filename: filename.to_string(),
            extension: extension.to_string(),
        };

        match index.get(stem) {
            Some(&i) => batch.groups[i].entries.push(entry),
            None => {
                index.insert(stem.to_string(), batch.groups.len());
                batch.groups.push(FileGroup {
                    stem: stem.to_string(),
                    entries: vec![entry],
                    tokens,
                });
            }
        }
    }

    debug!("Grouped into {} stem(s)", batch.groups.len());
    batch
}
