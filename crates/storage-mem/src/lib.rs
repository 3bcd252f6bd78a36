// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! An in-memory implementation of the repositories defined by
//! [`fls-storage`]
//!
//! The account store itself is an external capability of the service, so the
//! backend shipped here keeps everything in process memory behind a
//! [`tokio::sync::RwLock`]. Each repository method takes the lock once,
//! which makes every operation atomic on its own; there is no cross-call
//! transaction, and [`RepositoryTransaction::save`] is a no-op commit.
//!
//! [`fls-storage`]: fls_storage

#![allow(clippy::module_name_repetitions)]

use std::sync::Arc;

use async_trait::async_trait;
use fls_data_model::{AccountCandidate, ConnectedAccount, SocialPlatform, UserId};
use fls_storage::{
    BoxRepository, Clock, ConnectedAccountRepository, MapErr, RepositoryAccess, RepositoryError,
    RepositoryFactory, RepositoryTransaction,
};
use futures_util::future::BoxFuture;
use rand_core::RngCore;
use tokio::sync::RwLock;
use ulid::Ulid;

/// The error type of the in-memory backend. It has no inhabitants: the
/// backend cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum InMemoryStoreError {}

#[derive(Debug, Default)]
struct Store {
    accounts: Vec<ConnectedAccount>,
}

/// Hands out [`InMemoryRepository`] instances sharing a single store
#[derive(Clone, Default)]
pub struct InMemoryRepositoryFactory {
    store: Arc<RwLock<Store>>,
}

impl InMemoryRepositoryFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rows in the store, active or not. Meant for
    /// assertions in tests.
    pub async fn account_count(&self) -> usize {
        self.store.read().await.accounts.len()
    }
}

#[async_trait]
impl RepositoryFactory for InMemoryRepositoryFactory {
    async fn create(&self) -> Result<BoxRepository, RepositoryError> {
        Ok(Box::new(InMemoryRepository {
            store: Arc::clone(&self.store),
        }))
    }
}

/// A [`Repository`] over the shared in-memory store
///
/// [`Repository`]: fls_storage::Repository
pub struct InMemoryRepository {
    store: Arc<RwLock<Store>>,
}

impl RepositoryAccess for InMemoryRepository {
    type Error = RepositoryError;

    fn connected_account<'c>(
        &'c mut self,
    ) -> Box<dyn ConnectedAccountRepository<Error = Self::Error> + 'c> {
        Box::new(MapErr::new(
            InMemoryConnectedAccountRepository { store: &self.store },
            RepositoryError::from_error,
        ))
    }
}

impl RepositoryTransaction for InMemoryRepository {
    type Error = RepositoryError;

    fn save(self: Box<Self>) -> BoxFuture<'static, Result<(), Self::Error>> {
        // Writes were applied eagerly under the store lock
        Box::pin(std::future::ready(Ok(())))
    }

    fn cancel(self: Box<Self>) -> BoxFuture<'static, Result<(), Self::Error>> {
        Box::pin(std::future::ready(Ok(())))
    }
}

struct InMemoryConnectedAccountRepository<'c> {
    store: &'c Arc<RwLock<Store>>,
}

#[async_trait]
impl ConnectedAccountRepository for InMemoryConnectedAccountRepository<'_> {
    type Error = InMemoryStoreError;

    async fn lookup(&mut self, id: Ulid) -> Result<Option<ConnectedAccount>, Self::Error> {
        let store = self.store.read().await;
        Ok(store.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find(
        &mut self,
        user_id: &UserId,
        platform: SocialPlatform,
        platform_account_id: &str,
    ) -> Result<Option<ConnectedAccount>, Self::Error> {
        let store = self.store.read().await;
        Ok(store
            .accounts
            .iter()
            .find(|a| {
                a.user_id == *user_id
                    && a.platform == platform
                    && a.platform_account_id == platform_account_id
            })
            .cloned())
    }

    async fn upsert(
        &mut self,
        rng: &mut (dyn RngCore + Send),
        clock: &dyn Clock,
        user_id: &UserId,
        candidate: AccountCandidate,
    ) -> Result<ConnectedAccount, Self::Error> {
        // Hold the write lock across the find-or-insert so the uniqueness
        // triple can never be duplicated by concurrent callbacks
        let mut store = self.store.write().await;

        if let Some(row) = store.accounts.iter_mut().find(|a| {
            a.user_id == *user_id
                && a.platform == candidate.platform
                && a.platform_account_id == candidate.platform_account_id
        }) {
            row.display_name = candidate.display_name;
            row.access_token = candidate.access_token;
            row.token_expires_at = candidate.token_expires_at;
            row.metadata = candidate.metadata;
            row.is_active = true;
            return Ok(row.clone());
        }

        let now = clock.now();
        let account = ConnectedAccount {
            id: Ulid::from_datetime_with_source(now.into(), rng),
            user_id: user_id.clone(),
            platform: candidate.platform,
            platform_account_id: candidate.platform_account_id,
            display_name: candidate.display_name,
            access_token: candidate.access_token,
            token_expires_at: candidate.token_expires_at,
            metadata: candidate.metadata,
            is_active: true,
            created_at: now,
        };
        store.accounts.push(account.clone());
        Ok(account)
    }

    async fn list_active(
        &mut self,
        user_id: &UserId,
    ) -> Result<Vec<ConnectedAccount>, Self::Error> {
        let store = self.store.read().await;
        let mut accounts: Vec<ConnectedAccount> = store
            .accounts
            .iter()
            .filter(|a| a.user_id == *user_id && a.is_active)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(accounts)
    }

    async fn remove(
        &mut self,
        user_id: &UserId,
        platform: SocialPlatform,
        id: Ulid,
    ) -> Result<bool, Self::Error> {
        let mut store = self.store.write().await;
        let len_before = store.accounts.len();
        store
            .accounts
            .retain(|a| !(a.id == id && a.user_id == *user_id && a.platform == platform));
        Ok(store.accounts.len() != len_before)
    }
}
