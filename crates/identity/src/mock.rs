// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! A mock implementation of the [`IdentityVerifier`] trait
//!
//! [`IdentityVerifier`]: crate::IdentityVerifier

use std::{collections::HashMap, sync::RwLock};

use async_trait::async_trait;
use fls_data_model::VerifiedUser;

use crate::IdentityError;

/// A mock verifier holding a table of known bearer credentials
#[derive(Debug, Default)]
pub struct IdentityVerifier {
    users: RwLock<HashMap<String, VerifiedUser>>,
}

impl IdentityVerifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bearer credential resolving to the given user
    ///
    /// # Panics
    ///
    /// Panics if the internal lock was poisoned
    pub fn add_token(&self, token: impl Into<String>, user: VerifiedUser) {
        self.users.write().unwrap().insert(token.into(), user);
    }
}

#[async_trait]
impl crate::IdentityVerifier for IdentityVerifier {
    async fn verify_token(&self, token: &str) -> Result<VerifiedUser, IdentityError> {
        self.users
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(IdentityError::CredentialRejected)
    }
}
