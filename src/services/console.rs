// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed admin/artist console endpoints.
//!
//! Every call goes through the [`SessionGuard`], so token refresh and forced
//! logout apply uniformly.

use reqwest::Response;
use serde::de::DeserializeOwned;

use super::guard::SessionGuard;
use super::request::{Body, FormPart, RequestOptions};
use crate::error::{ClientError, Result};
use crate::models::{
    AccountPage, AlbumPage, ArtistTotals, PaginationAccountRequest, PaginationRequest,
    PaginationSongRequest, PlaylistPage, SongDraft, SongPage, SongResponse,
};

/// Artist-owned resources that can be deleted from the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistResource {
    Song,
    Album,
    Playlist,
}

impl ArtistResource {
    fn path_segment(self) -> &'static str {
        match self {
            ArtistResource::Song => "song",
            ArtistResource::Album => "album",
            ArtistResource::Playlist => "playlist",
        }
    }
}

/// Console API client.
#[derive(Clone)]
pub struct ConsoleApi {
    guard: SessionGuard,
}

impl ConsoleApi {
    pub fn new(guard: SessionGuard) -> Self {
        Self { guard }
    }

    pub async fn search_songs(&self, request: &PaginationSongRequest) -> Result<SongPage> {
        self.post_json("/search/songs", request).await
    }

    pub async fn search_accounts(&self, request: &PaginationAccountRequest) -> Result<AccountPage> {
        self.post_json("/search/accounts", request).await
    }

    pub async fn search_albums(&self, request: &PaginationRequest) -> Result<AlbumPage> {
        self.post_json("/search/albums", request).await
    }

    pub async fn search_playlists(&self, request: &PaginationRequest) -> Result<PlaylistPage> {
        self.post_json("/search/playlists", request).await
    }

    /// Fetch all artist dashboard counters concurrently.
    ///
    /// A counter that fails to load shows as 0; errors that end the session
    /// are returned instead, with a single login redirect for the whole call.
    pub async fn artist_totals(&self) -> Result<ArtistTotals> {
        self.guard.enforce(self.load_totals().await)
    }

    async fn load_totals(&self) -> Result<ArtistTotals> {
        let (songs, playlists, albums, listeners, followers, likes, downloads) = tokio::join!(
            self.total("totalSongs"),
            self.total("totalPlaylists"),
            self.total("totalAlbums"),
            self.total("totalListeners"),
            self.total("totalFollowers"),
            self.total("totalLikes"),
            self.total("totalDownloads"),
        );

        Ok(ArtistTotals {
            total_songs: songs?,
            total_playlists: playlists?,
            total_albums: albums?,
            total_listeners: listeners?,
            total_followers: followers?,
            total_likes: likes?,
            total_downloads: downloads?,
        })
    }

    pub async fn delete_song(&self, id: i64) -> Result<()> {
        self.delete(ArtistResource::Song, id).await
    }

    pub async fn delete_album(&self, id: i64) -> Result<()> {
        self.delete(ArtistResource::Album, id).await
    }

    pub async fn delete_playlist(&self, id: i64) -> Result<()> {
        self.delete(ArtistResource::Playlist, id).await
    }

    pub async fn delete(&self, resource: ArtistResource, id: i64) -> Result<()> {
        let target = format!("/artist/{}/delete/{}", resource.path_segment(), id);
        let response = self.guard.request(&target, RequestOptions::delete()).await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        tracing::info!(?resource, id, "Deleted");
        Ok(())
    }

    /// Upload a new song draft as a multipart form.
    pub async fn create_song_draft(&self, draft: &SongDraft) -> Result<SongResponse> {
        if draft.title.trim().is_empty() {
            return Err(ClientError::Validation("Song title is required".to_string()));
        }

        let mut parts = vec![FormPart::text("title", &draft.title)];
        if let Some(genre_id) = draft.genre_id {
            parts.push(FormPart::text("genreId", genre_id));
        }
        parts.push(FormPart::text("lyrics", &draft.lyrics));
        parts.push(FormPart::text("description", &draft.description));
        for artist_id in &draft.additional_artist_ids {
            parts.push(FormPart::text("additionalArtistIds", artist_id));
        }
        if let Some(file) = &draft.file {
            parts.push(FormPart::file("file", file.clone()));
        }
        if let Some(image) = &draft.image {
            parts.push(FormPart::file("image", image.clone()));
        }
        if let Some(permission) = draft.download_permission {
            parts.push(FormPart::text("downloadPermission", permission));
        }

        self.send_json(
            "/artist/song/createDraft",
            RequestOptions::post(Body::Multipart(parts)),
        )
        .await
    }

    /// One counter, sent without the guard; `artist_totals` applies it once.
    async fn total(&self, name: &str) -> Result<u64> {
        let target = format!("/artist/{}", name);
        let response = self
            .guard
            .client()
            .request(&target, RequestOptions::get())
            .await;
        match decode_json::<u64>(&target, response).await {
            Ok(value) => Ok(value),
            Err(e) if e.requires_login() => Err(e),
            Err(e) => {
                tracing::warn!(counter = name, error = %e, "Counter unavailable, showing 0");
                Ok(0)
            }
        }
    }

    async fn post_json<B, T>(&self, target: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize,
        T: DeserializeOwned,
    {
        self.send_json(target, RequestOptions::post(Body::json(body)?))
            .await
    }

    /// Send a guarded request and decode a JSON success body.
    async fn send_json<T: DeserializeOwned>(&self, target: &str, options: RequestOptions) -> Result<T> {
        let response = self.guard.request(target, options).await;
        decode_json(target, response).await
    }
}

async fn decode_json<T: DeserializeOwned>(target: &str, response: Result<Response>) -> Result<T> {
    let response = response?;

    if !response.status().is_success() {
        return Err(ClientError::from_response(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Decode(format!("{}: {}", target, e)))
}
