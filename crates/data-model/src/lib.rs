// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

#![allow(clippy::module_name_repetitions)]

pub(crate) mod accounts;
pub(crate) mod platform;
pub(crate) mod users;

pub use ulid::Ulid;

pub use self::{
    accounts::{AccountCandidate, ConnectedAccount},
    platform::{InvalidPlatformError, SocialPlatform},
    users::{UserId, VerifiedUser},
};
