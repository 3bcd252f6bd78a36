// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

#![deny(clippy::future_not_send)]
#![allow(clippy::module_name_repetitions)]

pub mod error_wrapper;
pub mod sentry;

pub use axum;

pub use self::error_wrapper::ErrorWrapper;

/// Record an error to Sentry and get a [`SentryEventID`] to attach to the
/// response.
///
/// With a single argument, the error is always captured. With a pattern as
/// the second argument, only errors matching the pattern are captured; the
/// others are considered client-caused and not worth reporting.
///
/// [`SentryEventID`]: crate::sentry::SentryEventID
#[macro_export]
macro_rules! record_error {
    ($error:expr) => {{
        let event_id = ::sentry::capture_error(&$error);
        $crate::sentry::SentryEventID::from(event_id)
    }};

    ($error:expr, $pattern:pat) => {{
        if matches!(&$error, $pattern) {
            let event_id = ::sentry::capture_error(&$error);
            $crate::sentry::SentryEventID::from(event_id)
        } else {
            $crate::sentry::SentryEventID::not_captured()
        }
    }};
}
