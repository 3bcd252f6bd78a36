// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::accounts::ConnectedAccountRepository;

/// The error type returned by [`BoxRepository`] operations, erasing the
/// backend-specific error type
#[derive(Debug, Error)]
#[error(transparent)]
pub struct RepositoryError {
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl RepositoryError {
    /// Construct a [`RepositoryError`] out of any error
    pub fn from_error<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            source: Box::new(source),
        }
    }
}

/// Access the various repositories the backend implements.
pub trait RepositoryAccess: Send {
    /// The backend-specific error type used by each repository.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Get a [`ConnectedAccountRepository`]
    fn connected_account<'c>(
        &'c mut self,
    ) -> Box<dyn ConnectedAccountRepository<Error = Self::Error> + 'c>;
}

/// A backend-agnostic unit of work over the storage backend.
pub trait RepositoryTransaction {
    /// The error type used by the save and cancel functions.
    type Error;

    /// Commit the unit of work.
    fn save(self: Box<Self>) -> BoxFuture<'static, Result<(), Self::Error>>;

    /// Discard the unit of work.
    fn cancel(self: Box<Self>) -> BoxFuture<'static, Result<(), Self::Error>>;
}

/// A [`Repository`] combines access to all repositories with transaction
/// semantics, with a unified error type
pub trait Repository<E>:
    RepositoryAccess<Error = E> + RepositoryTransaction<Error = E> + Send
{
}

impl<R, E> Repository<E> for R where
    R: RepositoryAccess<Error = E> + RepositoryTransaction<Error = E> + Send
{
}

/// A type-erased [`Repository`]
pub type BoxRepository = Box<dyn Repository<RepositoryError> + Send>;

/// A factory which hands out fresh [`BoxRepository`] instances, one per
/// request
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Create a new [`BoxRepository`]
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the backend could not be reached
    async fn create(&self) -> Result<BoxRepository, RepositoryError>;
}
