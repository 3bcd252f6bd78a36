// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! A client for the Facebook Graph API, covering the slice of it the link
//! service needs: building an authorization URL, exchanging an authorization
//! code for an access token, and walking the resource graph (profile →
//! delegated pages → Instagram business accounts) that token gives access
//! to.
//!
//! Every request is a free function taking a [`reqwest::Client`] and the
//! endpoint to hit, so callers stay in control of connection reuse and tests
//! can point everything at a mock server.

pub mod error;
pub mod http;
pub mod requests;
pub mod types;
