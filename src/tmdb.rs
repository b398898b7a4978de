use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{OrganizeError, Result};

const USER_AGENT: &str = "seasonfold/0.1.0";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub total_results: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub original_name: String,
    #[serde(default)]
    pub first_air_date: Option<String>,
}

impl SearchResult {
    pub fn first_air_year(&self) -> Option<&str> {
        air_year(self.first_air_date.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowDetails {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub original_name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season_number: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonDetails {
    #[serde(default)]
    pub episodes: Vec<EpisodeSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode_number: u32,
    #[serde(default)]
    pub name: String,
}

/// First four characters of a `YYYY-MM-DD` air date.
pub fn air_year(date: Option<&str>) -> Option<&str> {
    date.and_then(|d| d.get(..4))
}

/// Show and season lookups the pipelines depend on.
#[allow(async_fn_in_trait)]
pub trait MetadataProvider {
    async fn search_show(&self, title: &str) -> Result<SearchResponse>;
    async fn get_show(&self, id: u64) -> Result<ShowDetails>;
    async fn get_season(&self, show_id: u64, season_number: u32) -> Result<SeasonDetails>;
}

/// TMDB v3 client.
pub struct TmdbClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(api_base: &str, api_key: &str, language: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            language: language.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .get_tmdb_api_key()
            .ok_or_else(|| OrganizeError::Config("TMDB API key is not set".to_string()))?;

        Self::new(
            &config.api_base,
            &api_key,
            &config.get_language(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn url(&self, path: &str, query: Option<&str>) -> String {
        let mut url = format!(
            "{}{}?api_key={}&language={}",
            self.api_base,
            path,
            self.api_key,
            urlencoding::encode(&self.language)
        );
        if let Some(q) = query {
            url.push_str("&query=");
            url.push_str(&urlencoding::encode(q));
        }
        url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("TMDB request: {}", url.replace(&self.api_key, "***"));

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            warn!("TMDB API returned error: {}", response.status());
            return Err(OrganizeError::Provider(format!(
                "TMDB request failed: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

impl MetadataProvider for TmdbClient {
    async fn search_show(&self, title: &str) -> Result<SearchResponse> {
        let url = self.url("/search/tv", Some(title));
        let response: SearchResponse = self.get_json(&url).await?;
        info!("TMDB search '{}' returned {} result(s)", title, response.total_results);
        Ok(response)
    }

    async fn get_show(&self, id: u64) -> Result<ShowDetails> {
        let url = self.url(&format!("/tv/{}", id), None);
        self.get_json(&url).await
    }

    async fn get_season(&self, show_id: u64, season_number: u32) -> Result<SeasonDetails> {
        let url = self.url(&format!("/tv/{}/season/{}", show_id, season_number), None);
        let season: SeasonDetails = self.get_json(&url).await?;
        info!("Found {} episodes for season {}", season.episodes.len(), season_number);
        Ok(season)
    }
}
