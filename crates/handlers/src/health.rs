// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use axum::response::IntoResponse;

#[tracing::instrument(name = "handlers.health.get", skip_all)]
pub(crate) async fn get() -> impl IntoResponse {
    "ok"
}

#[cfg(test)]
mod tests {
    use hyper::{Request, StatusCode};

    use crate::test_utils::{RequestBuilderExt, ResponseExt, TestState, setup};

    #[tokio::test]
    async fn test_get_health() {
        setup();
        let state = TestState::new();

        let request = Request::get("/health").empty();
        let response = state.request(request).await;
        response.assert_status(StatusCode::OK);
    }
}
