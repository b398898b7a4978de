use std::path::Path;
use tracing::info;
use walkdir::WalkDir;

use crate::error::{OrganizeError, Result};
use crate::folder_name::season_number_from_folder;
use crate::grouper::group_files;
use crate::nfo::{TvShowNfo, NFO_FILENAME};
use crate::renamer::{rename_batch, EpisodeMap, RenameSummary};
use crate::show::build_episode_map;
use crate::tmdb::MetadataProvider;

/// Files directly inside `dir`, sorted by name. Symlinks count when they point at a file.
pub fn list_media_files(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| OrganizeError::Io(e.into()))?;
        let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());
        if is_file {
            files.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    Ok(files)
}

/// Rename the files of one season folder against an already built episode map.
pub fn rename_season_folder(dir: &Path, show_title: &str, episodes: &EpisodeMap) -> Result<RenameSummary> {
    let files = list_media_files(dir)?;
    let batch = group_files(&files, show_title);
    info!("📹 {} file group(s) to process in {}", batch.group_count(), dir.display());
    Ok(rename_batch(dir, &batch, episodes))
}

/// Rename a season folder using the `tvshow.nfo` of its parent show folder.
pub async fn organize_folder<P: MetadataProvider>(provider: &P, path: &Path) -> Result<RenameSummary> {
    let dir = path.canonicalize()?;
    let nfo = TvShowNfo::read(&dir.join("..").join(NFO_FILENAME))?;

    let folder = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let season_number =
        season_number_from_folder(&folder).ok_or(OrganizeError::SeasonNotDetected(folder))?;

    info!("📺 {} (TMDB {}) season {}", nfo.title, nfo.tmdb_id, season_number);

    let show = provider.get_show(nfo.tmdb_id).await?;
    let season = provider.get_season(nfo.tmdb_id, season_number).await?;
    let episodes = build_episode_map(&show.name, season_number, &season);

    rename_season_folder(&dir, &nfo.title, &episodes)
}
