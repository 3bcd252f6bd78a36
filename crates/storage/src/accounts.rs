// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Repository for [`ConnectedAccount`] rows

use async_trait::async_trait;
use fls_data_model::{AccountCandidate, ConnectedAccount, SocialPlatform, UserId};
use rand_core::RngCore;
use ulid::Ulid;

use crate::{Clock, repository_impl};

/// A [`ConnectedAccountRepository`] helps interacting with
/// [`ConnectedAccount`] rows in the storage backend
#[async_trait]
pub trait ConnectedAccountRepository: Send + Sync {
    /// The error type returned by the repository
    type Error;

    /// Lookup a connected account by its ID
    ///
    /// Returns `None` if the account does not exist
    ///
    /// # Parameters
    ///
    /// * `id`: The ID of the connected account to lookup
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the underlying repository fails
    async fn lookup(&mut self, id: Ulid) -> Result<Option<ConnectedAccount>, Self::Error>;

    /// Find a connected account by its uniqueness triple, regardless of
    /// whether it is active
    ///
    /// Returns `None` if no matching account was found
    ///
    /// # Parameters
    ///
    /// * `user_id`: The user owning the link
    /// * `platform`: The platform of the external account
    /// * `platform_account_id`: The provider-side identifier of the account
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the underlying repository fails
    async fn find(
        &mut self,
        user_id: &UserId,
        platform: SocialPlatform,
        platform_account_id: &str,
    ) -> Result<Option<ConnectedAccount>, Self::Error>;

    /// Insert or update the row matching the candidate's uniqueness triple
    ///
    /// If a row already exists for (`user_id`, candidate platform, candidate
    /// account id), its credential, expiry, display name and metadata are
    /// replaced and the row is marked active; otherwise a new row is
    /// inserted. Atomic per candidate.
    ///
    /// Returns the row as persisted.
    ///
    /// # Parameters
    ///
    /// * `rng`: The random number generator to use
    /// * `clock`: The clock used to generate timestamps
    /// * `user_id`: The user owning the link
    /// * `candidate`: The discovered account to persist
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the underlying repository fails
    async fn upsert(
        &mut self,
        rng: &mut (dyn RngCore + Send),
        clock: &dyn Clock,
        user_id: &UserId,
        candidate: AccountCandidate,
    ) -> Result<ConnectedAccount, Self::Error>;

    /// List the active connected accounts of a user, newest first
    ///
    /// # Parameters
    ///
    /// * `user_id`: The user whose accounts to list
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the underlying repository fails
    async fn list_active(&mut self, user_id: &UserId)
    -> Result<Vec<ConnectedAccount>, Self::Error>;

    /// Delete a connected account, scoped to its owner
    ///
    /// The row is only removed when all three of owner, platform and row ID
    /// match; a non-matching combination is a no-op. Returns whether a row
    /// was removed.
    ///
    /// # Parameters
    ///
    /// * `user_id`: The user issuing the removal
    /// * `platform`: The platform of the account to remove
    /// * `id`: The row ID of the account to remove
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the underlying repository fails
    async fn remove(
        &mut self,
        user_id: &UserId,
        platform: SocialPlatform,
        id: Ulid,
    ) -> Result<bool, Self::Error>;
}

repository_impl!(ConnectedAccountRepository:
    async fn lookup(&mut self, id: Ulid) -> Result<Option<ConnectedAccount>, Self::Error>;

    async fn find(
        &mut self,
        user_id: &UserId,
        platform: SocialPlatform,
        platform_account_id: &str,
    ) -> Result<Option<ConnectedAccount>, Self::Error>;

    async fn upsert(
        &mut self,
        rng: &mut (dyn RngCore + Send),
        clock: &dyn Clock,
        user_id: &UserId,
        candidate: AccountCandidate,
    ) -> Result<ConnectedAccount, Self::Error>;

    async fn list_active(&mut self, user_id: &UserId) -> Result<Vec<ConnectedAccount>, Self::Error>;

    async fn remove(
        &mut self,
        user_id: &UserId,
        platform: SocialPlatform,
        id: Ulid,
    ) -> Result<bool, Self::Error>;
);
