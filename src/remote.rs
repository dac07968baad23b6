use std::time::{Duration, Instant};

use reqwest::header::ACCEPT;
use reqwest::{Client, ClientBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::model::GameRecord;

/// Where monthly archives come from.
///
/// `list_archives` yields the archive locations for a player, oldest first as
/// the API returns them; `fetch_games` yields the games of one archive.
#[allow(async_fn_in_trait)]
pub trait ArchiveSource {
    async fn list_archives(&self, player: &str) -> Result<Vec<String>>;
    async fn fetch_games(&self, archive_url: &str) -> Result<Vec<GameRecord>>;
}

#[derive(Debug, Default, Deserialize)]
struct ArchiveList {
    #[serde(default)]
    archives: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct GameBatch {
    #[serde(default)]
    games: Option<Vec<GameRecord>>,
}

/// chess.com published-data API.
///
/// Cheap to clone; every request shares the one connection pool.
#[derive(Clone, Debug)]
pub struct ChessCom {
    base_url: String,
    client: Client,
}

impl ChessCom {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::with_builder(cfg, Client::builder())
    }

    /// Like `from_config`, on top of a caller-prepared client builder.
    pub fn with_builder(cfg: &Config, builder: ClientBuilder) -> Result<Self> {
        let mut builder = builder.user_agent(cfg.user_agent.clone());
        if let Some(secs) = cfg.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            base_url: cfg.base_url.clone(),
            client: builder.build()?,
        })
    }

    /// `{base}/{player}/games/archives`, with the player as an encoded path segment.
    pub fn archives_url(&self, player: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(player)
            .extend(["games", "archives"]);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let t0 = Instant::now();
        vprintln!("remote: GET {}", url);

        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { url: url.to_string() });
        }
        if !status.is_success() {
            return Err(FetchError::RequestFailed { url: url.to_string(), status: status.as_u16() });
        }
        let body = resp.json::<T>().await?;
        vprintln!("remote: {} done in {:.3}s", url, t0.elapsed().as_secs_f64());
        Ok(body)
    }
}

impl ArchiveSource for ChessCom {
    async fn list_archives(&self, player: &str) -> Result<Vec<String>> {
        let url = self.archives_url(player)?;
        let list: ArchiveList = self.get_json(url.as_str()).await?;
        let archives = list.archives.unwrap_or_default();
        vprintln!("remote: {} archives for {}", archives.len(), player);
        Ok(archives)
    }

    async fn fetch_games(&self, archive_url: &str) -> Result<Vec<GameRecord>> {
        let batch: GameBatch = self.get_json(archive_url).await?;
        Ok(batch.games.unwrap_or_default())
    }
}
