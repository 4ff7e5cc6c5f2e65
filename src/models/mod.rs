// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the console client.

pub mod account;
pub mod music;
pub mod user;

pub use account::{RefreshRequest, RefreshResponse, SignInRequest, SignInResponse};
pub use music::{
    AccountPage, AccountSummary, AlbumPage, AlbumResponse, ArtistTotals, Page,
    PaginationAccountRequest, PaginationRequest, PaginationSongRequest, PlaylistPage,
    PlaylistResponse, SongDraft, SongPage, SongResponse, SortOrder, UploadFile,
};
pub use user::{Credentials, UserType};
