// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog and account listing payloads for the console pages.

use serde::{Deserialize, Serialize};

use super::UserType;

/// Sort direction accepted by the search endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Song search request (`POST /search/songs`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSongRequest {
    pub page: u32,
    pub size: u32,
    pub genre_id: Option<i64>,
    /// `releaseDate`, `numberOfListeners` or `countListen`
    pub order_by: String,
    pub order: SortOrder,
    pub search: String,
}

impl Default for PaginationSongRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            genre_id: None,
            order_by: "releaseDate".to_string(),
            order: SortOrder::Asc,
            search: String::new(),
        }
    }
}

/// Account search request (`POST /search/accounts`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationAccountRequest {
    pub page: u32,
    pub size: u32,
    pub search: String,
    /// LOCKED(-4), DELETED(-3), INACTIVE(-1), ACTIVE(1); `None` for all
    pub status: Option<i32>,
    pub order_by: String,
    pub user_type: Option<UserType>,
    pub order: SortOrder,
}

impl Default for PaginationAccountRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            search: String::new(),
            status: Some(1),
            order_by: "createdDate".to_string(),
            user_type: None,
            order: SortOrder::Asc,
        }
    }
}

/// Album and playlist search request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationRequest {
    pub page: u32,
    pub size: u32,
    /// `releaseDate` or `title`
    pub order_by: String,
    pub order: SortOrder,
    pub search: String,
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            order_by: "releaseDate".to_string(),
            order: SortOrder::Asc,
            search: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongResponse {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub mp3_url: Option<String>,
    #[serde(default)]
    pub download_permission: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub song_status: Option<String>,
    #[serde(default)]
    pub genre_name_list: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResponse {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub album_time_length: Option<f32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResponse {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub play_time_length: Option<f32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub created_date: Option<String>,
}

/// One page of a search result.
///
/// The backend names the item list after the resource (`songs`, `albums`,
/// `playlists`) or `content` for accounts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(alias = "songs", alias = "albums", alias = "playlists", alias = "content")]
    pub items: Vec<T>,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
}

fn first_page() -> u32 {
    1
}

pub type SongPage = Page<SongResponse>;
pub type AlbumPage = Page<AlbumResponse>;
pub type PlaylistPage = Page<PlaylistResponse>;
pub type AccountPage = Page<AccountSummary>;

/// Artist dashboard counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistTotals {
    pub total_songs: u64,
    pub total_playlists: u64,
    pub total_albums: u64,
    pub total_listeners: u64,
    pub total_followers: u64,
    pub total_likes: u64,
    pub total_downloads: u64,
}

/// An uploaded file attached to a song draft.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// New song draft (`POST /artist/song/createDraft`, multipart).
#[derive(Debug, Clone, Default)]
pub struct SongDraft {
    pub title: String,
    pub genre_id: Option<i64>,
    pub lyrics: String,
    pub description: String,
    pub additional_artist_ids: Vec<i64>,
    pub download_permission: Option<bool>,
    pub file: Option<UploadFile>,
    pub image: Option<UploadFile>,
}
