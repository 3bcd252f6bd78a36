// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::convert::Infallible;

use axum::response::{IntoResponseParts, ResponseParts};
use sentry::types::Uuid;

/// A wrapper to include a Sentry event ID in the response headers.
///
/// Responses for errors that were not captured carry no header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SentryEventID(Option<Uuid>);

impl SentryEventID {
    /// An ID for an error which was deliberately not reported to Sentry.
    #[must_use]
    pub const fn not_captured() -> Self {
        Self(None)
    }
}

impl From<Uuid> for SentryEventID {
    fn from(uuid: Uuid) -> Self {
        Self(Some(uuid))
    }
}

impl IntoResponseParts for SentryEventID {
    type Error = Infallible;
    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(uuid) = self.0 {
            res.headers_mut()
                .insert("X-Sentry-Event-ID", uuid.to_string().parse().unwrap());
        }

        Ok(res)
    }
}
