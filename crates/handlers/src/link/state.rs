// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! The anti-forgery state carried through the authorization round trip
//!
//! The state parameter binds the callback to the user who started the flow.
//! It is not stored server-side: the initiating user's identifier is carried
//! inside the parameter itself, signed so it cannot be minted or altered by
//! anyone without the key.

use base64ct::{Base64UrlUnpadded, Encoding};
use fls_data_model::UserId;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error)]
pub(crate) enum StateError {
    #[error("malformed state parameter")]
    Malformed,

    #[error("state parameter signature verification failed")]
    BadSignature,

    #[error("state parameter was issued to another user")]
    UserMismatch,
}

/// Signs and verifies the `state` parameter of the authorization round trip
#[derive(Clone)]
pub struct StateSigner {
    key: Vec<u8>,
}

impl StateSigner {
    /// Create a signer from the configured state key
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self {
            key: key.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC can take a key of any size")
    }

    /// Build the state value for a user: `<user id>.<base64url tag>`
    pub(crate) fn sign(&self, user_id: &UserId) -> String {
        let mut mac = self.mac();
        mac.update(user_id.as_str().as_bytes());
        let tag = mac.finalize().into_bytes();
        format!("{user_id}.{}", Base64UrlUnpadded::encode_string(&tag))
    }

    /// Check a returned state value against the verified caller
    ///
    /// The signature is checked before the identity comparison, so a forged
    /// parameter never gets to influence anything.
    pub(crate) fn verify(&self, state: &str, user_id: &UserId) -> Result<(), StateError> {
        // The tag alphabet has no `.`, so the last one separates the carried
        // identity from the tag even if the identity itself contains dots
        let (carried, tag) = state.rsplit_once('.').ok_or(StateError::Malformed)?;
        let tag = Base64UrlUnpadded::decode_vec(tag).map_err(|_| StateError::Malformed)?;

        let mut mac = self.mac();
        mac.update(carried.as_bytes());
        mac.verify_slice(&tag)
            .map_err(|_| StateError::BadSignature)?;

        if carried != user_id.as_str() {
            return Err(StateError::UserMismatch);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use fls_data_model::UserId;

    use super::{StateError, StateSigner};

    #[test]
    fn sign_verify_roundtrip() {
        let signer = StateSigner::new("test-state-signing-key");
        let alice = UserId::new("alice");

        let state = signer.sign(&alice);
        signer.verify(&state, &alice).unwrap();
    }

    #[test]
    fn reject_tampered_state() {
        let signer = StateSigner::new("test-state-signing-key");
        let alice = UserId::new("alice");
        let mallory = UserId::new("mallory");

        // Replace the carried identity, keep the tag
        let state = signer.sign(&alice);
        let tag = state.rsplit_once('.').unwrap().1;
        let forged = format!("{mallory}.{tag}");

        let error = signer.verify(&forged, &mallory).unwrap_err();
        assert_matches!(error, StateError::BadSignature);
    }

    #[test]
    fn reject_state_of_another_user() {
        let signer = StateSigner::new("test-state-signing-key");
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        let state = signer.sign(&bob);
        let error = signer.verify(&state, &alice).unwrap_err();
        assert_matches!(error, StateError::UserMismatch);
    }

    #[test]
    fn reject_unsigned_state() {
        let signer = StateSigner::new("test-state-signing-key");
        let alice = UserId::new("alice");

        let error = signer.verify("alice", &alice).unwrap_err();
        assert_matches!(error, StateError::Malformed);
    }

    #[test]
    fn reject_state_signed_with_another_key() {
        let signer = StateSigner::new("test-state-signing-key");
        let other = StateSigner::new("another-signing-key!");
        let alice = UserId::new("alice");

        let state = other.sign(&alice);
        let error = signer.verify(&state, &alice).unwrap_err();
        assert_matches!(error, StateError::BadSignature);
    }
}
