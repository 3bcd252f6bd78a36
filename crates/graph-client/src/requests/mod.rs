// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Methods to interact with the Graph API endpoints

pub mod authorization;
pub mod instagram;
pub mod pages;
pub mod profile;
pub mod token;
