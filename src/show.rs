use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{OrganizeError, Result};
use crate::folder_name::{parse_show_folder, season_folder_name};
use crate::nfo::TvShowNfo;
use crate::renamer::EpisodeMap;
use crate::tmdb::{MetadataProvider, SearchResponse, SearchResult, SeasonDetails, ShowDetails};

#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created { nfo: PathBuf, seasons: Vec<PathBuf> },
    /// Folder name carried no title or year.
    Ignored(String),
    /// Provider had nothing that matched title and year.
    NoMatch(String),
}

/// Pick the search result for `title` first aired in `year`.
///
/// A single result only has to match the year. With several results the name
/// must also match, ignoring case.
pub fn select_exact_match<'a>(
    response: &'a SearchResponse,
    title: &str,
    year: &str,
) -> Result<Option<&'a SearchResult>> {
    match response.results.as_slice() {
        [] => Ok(None),
        [only] => {
            if only.first_air_year() == Some(year) {
                Ok(Some(only))
            } else {
                Err(OrganizeError::YearMismatch {
                    expected: year.to_string(),
                    found: only.first_air_year().unwrap_or("none").to_string(),
                })
            }
        }
        results => {
            let title_lower = title.to_lowercase();
            results
                .iter()
                .find(|r| r.name.to_lowercase() == title_lower && r.first_air_year() == Some(year))
                .map(Some)
                .ok_or_else(|| OrganizeError::NoExactMatch {
                    title: title.to_string(),
                    year: year.to_string(),
                })
        }
    }
}

/// `<Series> - S01E02 - <Episode>` for every episode of the season.
pub fn build_episode_map(series_name: &str, season_number: u32, season: &SeasonDetails) -> EpisodeMap {
    season
        .episodes
        .iter()
        .map(|ep| {
            let name = format!(
                "{} - S{:02}E{:02} - {}",
                series_name, season_number, ep.episode_number, ep.name
            );
            (ep.episode_number, name)
        })
        .collect()
}

/// Create one folder per provider season under `base`. Existing folders are left alone.
pub fn scaffold_season_folders(details: &ShowDetails, base: &Path) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    for season in &details.seasons {
        let folder = base.join(season_folder_name(season.season_number));
        if !folder.exists() {
            std::fs::create_dir_all(&folder)?;
            info!("Created {}", folder.display());
            created.push(folder);
        }
    }
    Ok(created)
}

/// Title and year from the folder at `path`, or the outcome for a folder that gets skipped.
fn show_query(path: &Path) -> std::result::Result<(String, String), CreateOutcome> {
    let folder = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let parsed = parse_show_folder(&folder);

    match parsed.year {
        Some(year) if !parsed.title.is_empty() => Ok((parsed.title, year)),
        _ => {
            warn!("{} was ignored", parsed.title);
            Err(CreateOutcome::Ignored(parsed.title))
        }
    }
}

/// Resolve the show folder at `path`, write its sidecar and season folders.
pub async fn create_show<P: MetadataProvider>(provider: &P, path: &Path) -> Result<CreateOutcome> {
    match show_query(path) {
        Ok((title, year)) => resolve_show(provider, path, &title, &year).await,
        Err(outcome) => Ok(outcome),
    }
}

/// Like [`create_show`], but only builds the provider once the folder name
/// carries a title and year. Ignored folders never call `connect`.
pub async fn create_show_with<P, F>(path: &Path, connect: F) -> Result<CreateOutcome>
where
    P: MetadataProvider,
    F: FnOnce() -> Result<P>,
{
    match show_query(path) {
        Ok((title, year)) => {
            let provider = connect()?;
            resolve_show(&provider, path, &title, &year).await
        }
        Err(outcome) => Ok(outcome),
    }
}

async fn resolve_show<P: MetadataProvider>(
    provider: &P,
    path: &Path,
    title: &str,
    year: &str,
) -> Result<CreateOutcome> {
    let response = provider.search_show(title).await?;
    let selected = match select_exact_match(&response, title, year) {
        Ok(Some(result)) => result,
        Ok(None) => {
            warn!("No results for '{}'", title);
            return Ok(CreateOutcome::NoMatch(title.to_string()));
        }
        Err(e) if e.is_ambiguous_match() => {
            warn!("{}", e);
            return Ok(CreateOutcome::NoMatch(title.to_string()));
        }
        Err(e) => return Err(e),
    };

    info!("Matched '{}' to TMDB id {}", title, selected.id);

    let details = provider.get_show(selected.id).await?;
    let nfo = TvShowNfo::from_details(&details).write(path)?;
    let seasons = scaffold_season_folders(&details, path)?;

    Ok(CreateOutcome::Created { nfo, seasons })
}
