// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Interactions with the storage backend
//!
//! This crate provides a set of traits that can be implemented to interact
//! with the storage backend. Those traits are called repositories and are
//! grouped by the type of data they manage.
//!
//! Each of those repositories can be accessed via the [`RepositoryAccess`]
//! trait. This trait can be wrapped in a [`BoxRepository`] to allow using it
//! without caring about the underlying storage backend, and without carrying
//! around the generic type parameter.
//!
//! This crate also defines a [`Clock`] trait that can be used to abstract the
//! way the current time is retrieved. It has two implementations:
//! [`SystemClock`] that uses the system time and [`MockClock`] which is
//! useful for testing.
//!
//! [`MockClock`]: crate::clock::MockClock
//!
//! Repository methods that write rows take a random number generator and a
//! [`Clock`] so that IDs and timestamps stay deterministic under test; no
//! repository implementation may reach for the ambient time or entropy.

#![deny(clippy::future_not_send, missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod accounts;
pub mod clock;
pub(crate) mod repository;
mod utils;

pub use self::{
    accounts::ConnectedAccountRepository,
    clock::{Clock, SystemClock},
    repository::{
        BoxRepository, Repository, RepositoryAccess, RepositoryError, RepositoryFactory,
        RepositoryTransaction,
    },
    utils::{BoxClock, BoxRng, MapErr},
};
