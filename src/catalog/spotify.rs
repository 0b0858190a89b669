//! Spotify Web API catalog: artist albums and playlist tracks, flattened across pages.

use crate::catalog::{CatalogError, CatalogSource, CredentialProvider};
use crate::models::{Candidate, CompetitorKind};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

/// Page size for artist album listings (catalog maximum).
const ALBUM_PAGE_LIMIT: &str = "50";
/// Maximum ids per batched album lookup.
const ALBUM_BATCH_SIZE: usize = 20;
const PLAYLIST_TRACK_FIELDS: &str = "items(track(name,popularity,album(images))),next";

#[derive(Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    next: Option<String>,
}

#[derive(Deserialize)]
struct AlbumRef {
    id: String,
}

#[derive(Deserialize)]
struct Image {
    url: String,
}

#[derive(Deserialize)]
struct FullAlbum {
    name: Option<String>,
    #[serde(default)]
    popularity: u32,
    #[serde(default)]
    images: Vec<Image>,
}

#[derive(Deserialize)]
struct AlbumBatch {
    albums: Vec<Option<FullAlbum>>,
}

#[derive(Deserialize)]
struct PlaylistItem {
    track: Option<Track>,
}

#[derive(Deserialize)]
struct Track {
    name: Option<String>,
    #[serde(default)]
    popularity: u32,
    album: Option<TrackAlbum>,
}

#[derive(Deserialize)]
struct TrackAlbum {
    #[serde(default)]
    images: Vec<Image>,
}

fn artwork(images: Vec<Image>) -> Vec<String> {
    images.into_iter().map(|i| i.url).collect()
}

/// Catalog client for the Spotify Web API.
pub struct SpotifyCatalog {
    http: reqwest::Client,
    api_url: String,
    market: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl SpotifyCatalog {
    pub fn new(
        http: reqwest::Client,
        api_url: impl Into<String>,
        market: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            market: market.into(),
            credentials,
        }
    }

    /// GET with the current bearer token. A 401 invalidates the token and retries once.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let mut reauthenticated = false;
        loop {
            let token = self.credentials.current_token().await?;
            let response = self
                .http
                .get(url)
                .query(query)
                .bearer_auth(token.secret())
                .send()
                .await?;
            let status = response.status();
            if status == StatusCode::UNAUTHORIZED && !reauthenticated {
                log::warn!("Catalog rejected access token, re-authenticating");
                self.credentials.invalidate().await;
                reauthenticated = true;
                continue;
            }
            if !status.is_success() {
                return Err(CatalogError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }
            return response
                .json()
                .await
                .map_err(|e| CatalogError::Decode(e.to_string()));
        }
    }

    /// Every item of a paginated listing. `next` URLs already carry their query.
    async fn collect_pages<T: DeserializeOwned>(
        &self,
        first_url: String,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, CatalogError> {
        let mut items = Vec::new();
        let mut page: Page<T> = self.get_json(&first_url, query).await?;
        loop {
            items.append(&mut page.items);
            match page.next.take() {
                Some(next) => page = self.get_json(&next, &[]).await?,
                None => break,
            }
        }
        Ok(items)
    }

    async fn fetch_albums(&self, artist_id: &str) -> Result<Vec<Candidate>, CatalogError> {
        let listing_url = format!("{}/artists/{}/albums", self.api_url, artist_id);
        let refs: Vec<AlbumRef> = self
            .collect_pages(
                listing_url,
                &[
                    ("include_groups", "album"),
                    ("market", self.market.as_str()),
                    ("limit", ALBUM_PAGE_LIMIT),
                ],
            )
            .await?;
        log::debug!("Artist {} lists {} albums", artist_id, refs.len());

        // Listings omit popularity; resolve full albums in batches, keeping listing order.
        let albums_url = format!("{}/albums", self.api_url);
        let mut candidates = Vec::with_capacity(refs.len());
        for batch in refs.chunks(ALBUM_BATCH_SIZE) {
            let ids = batch.iter().map(|a| a.id.as_str()).collect::<Vec<_>>().join(",");
            let resolved: AlbumBatch = self
                .get_json(&albums_url, &[("ids", ids.as_str()), ("market", self.market.as_str())])
                .await?;
            candidates.extend(resolved.albums.into_iter().flatten().map(|album| Candidate {
                title: album.name,
                popularity: album.popularity,
                artwork_ids: artwork(album.images),
            }));
        }
        Ok(candidates)
    }

    async fn fetch_tracks(&self, playlist_id: &str) -> Result<Vec<Candidate>, CatalogError> {
        let url = format!("{}/playlists/{}/tracks", self.api_url, playlist_id);
        let items: Vec<PlaylistItem> = self
            .collect_pages(
                url,
                &[("market", self.market.as_str()), ("fields", PLAYLIST_TRACK_FIELDS)],
            )
            .await?;
        // Removed or unavailable tracks come back as null.
        let candidates = items
            .into_iter()
            .filter_map(|item| item.track)
            .map(|track| Candidate {
                title: track.name,
                popularity: track.popularity,
                artwork_ids: track.album.map(|a| artwork(a.images)).unwrap_or_default(),
            })
            .collect();
        Ok(candidates)
    }
}

#[async_trait]
impl CatalogSource for SpotifyCatalog {
    async fn fetch_candidates(
        &self,
        origin: &str,
        kind: CompetitorKind,
    ) -> Result<Vec<Candidate>, CatalogError> {
        match kind {
            CompetitorKind::Album => self.fetch_albums(origin).await,
            CompetitorKind::Track => self.fetch_tracks(origin).await,
        }
    }
}
