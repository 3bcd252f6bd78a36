// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use std::{
    convert::Infallible,
    sync::{Arc, Mutex},
};

use axum::{
    body::Body,
    extract::{FromRef, FromRequestParts},
    response::Response,
};
use fls_axum_utils::ErrorWrapper;
use fls_data_model::{AccountCandidate, ConnectedAccount, SocialPlatform, UserId, VerifiedUser};
use fls_identity::{IdentityVerifier, MockIdentityVerifier};
use fls_storage::{
    BoxClock, BoxRepository, BoxRng, RepositoryError, RepositoryFactory, clock::MockClock,
};
use fls_storage_mem::InMemoryRepositoryFactory;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Request, StatusCode};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use serde::{Serialize, de::DeserializeOwned};
use tower::ServiceExt;
use url::Url;

use crate::{LinkConfig, StateSigner};

/// Setup rustcrypto and tracing for tests.
#[allow(unused_must_use)]
pub(crate) fn setup() {
    rustls::crypto::aws_lc_rs::default_provider().install_default();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init();
}

#[derive(Clone)]
pub(crate) struct TestState {
    pub repository_factory: InMemoryRepositoryFactory,
    pub identity: Arc<MockIdentityVerifier>,
    pub link_config: LinkConfig,
    pub signer: StateSigner,
    pub clock: Arc<MockClock>,
    pub rng: Arc<Mutex<ChaChaRng>>,
    pub http_client: reqwest::Client,
}

impl TestState {
    /// A state whose graph endpoint points nowhere. Good for every test
    /// which must not reach the provider.
    pub(crate) fn new() -> Self {
        Self::with_graph_endpoint("http://graph.test.invalid/".parse().unwrap())
    }

    pub(crate) fn with_graph_endpoint(graph_endpoint: Url) -> Self {
        let link_config = LinkConfig {
            client_id: Some("1089765432100001".to_owned()),
            client_secret: Some("app-secret".to_owned()),
            authorization_endpoint: "https://www.facebook.com/v18.0/dialog/oauth"
                .parse()
                .unwrap(),
            graph_endpoint,
            public_base: "https://app.example.com/".parse().unwrap(),
            scopes: None,
        };

        Self {
            repository_factory: InMemoryRepositoryFactory::new(),
            identity: Arc::new(MockIdentityVerifier::new()),
            link_config,
            signer: StateSigner::new("test-state-signing-key"),
            clock: Arc::new(MockClock::default()),
            rng: Arc::new(Mutex::new(ChaChaRng::seed_from_u64(42))),
            http_client: reqwest::Client::new(),
        }
    }

    /// Register a bearer credential resolving to a fresh user
    pub(crate) fn token_for(&self, token: &str, user_id: &str) -> VerifiedUser {
        let user = VerifiedUser {
            id: UserId::new(user_id),
            email: None,
        };
        self.identity.add_token(token, user.clone());
        user
    }

    /// Fork the shared deterministic RNG
    pub(crate) fn rng(&self) -> ChaChaRng {
        let mut parent = self.rng.lock().expect("poisoned RNG lock");
        ChaChaRng::from_rng(&mut *parent).expect("could not fork RNG")
    }

    /// Put a row straight into the store
    pub(crate) async fn seed_account(
        &self,
        user_id: &UserId,
        platform: SocialPlatform,
        platform_account_id: &str,
    ) -> ConnectedAccount {
        let mut repo = self.repository_factory.create().await.unwrap();
        let mut rng = self.rng();

        let account = repo
            .connected_account()
            .upsert(
                &mut rng,
                &self.clock,
                user_id,
                AccountCandidate {
                    platform,
                    platform_account_id: platform_account_id.to_owned(),
                    display_name: None,
                    access_token: "seeded-token".to_owned(),
                    token_expires_at: None,
                    metadata: serde_json::json!({}),
                },
            )
            .await
            .unwrap();

        repo.save().await.unwrap();
        account
    }

    /// Run one request through the full router
    pub(crate) async fn request(&self, request: Request<Body>) -> Response {
        let app = crate::router().with_state(self.clone());
        app.oneshot(request).await.expect("infallible")
    }
}

impl FromRef<TestState> for reqwest::Client {
    fn from_ref(input: &TestState) -> Self {
        input.http_client.clone()
    }
}

impl FromRef<TestState> for LinkConfig {
    fn from_ref(input: &TestState) -> Self {
        input.link_config.clone()
    }
}

impl FromRef<TestState> for StateSigner {
    fn from_ref(input: &TestState) -> Self {
        input.signer.clone()
    }
}

impl FromRef<TestState> for Arc<dyn IdentityVerifier> {
    fn from_ref(input: &TestState) -> Self {
        input.identity.clone()
    }
}

impl FromRequestParts<TestState> for BoxClock {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut axum::http::request::Parts,
        state: &TestState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Box::new(Arc::clone(&state.clock)))
    }
}

impl FromRequestParts<TestState> for BoxRng {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut axum::http::request::Parts,
        state: &TestState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Box::new(state.rng()))
    }
}

impl FromRequestParts<TestState> for BoxRepository {
    type Rejection = ErrorWrapper<RepositoryError>;

    async fn from_request_parts(
        _parts: &mut axum::http::request::Parts,
        state: &TestState,
    ) -> Result<Self, Self::Rejection> {
        let repo = state.repository_factory.create().await?;
        Ok(repo)
    }
}

pub(crate) trait RequestBuilderExt {
    /// Set the bearer credential of the request
    fn bearer(self, token: &str) -> Self;

    /// Finish the request with a JSON body
    fn json<T: Serialize>(self, body: &T) -> Request<Body>;

    /// Finish the request with an empty body
    fn empty(self) -> Request<Body>;
}

impl RequestBuilderExt for http::request::Builder {
    fn bearer(self, token: &str) -> Self {
        self.header(AUTHORIZATION, format!("Bearer {token}"))
    }

    fn json<T: Serialize>(self, body: &T) -> Request<Body> {
        self.header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    fn empty(self) -> Request<Body> {
        self.body(Body::empty()).unwrap()
    }
}

pub(crate) trait ResponseExt {
    fn assert_status(&self, status: StatusCode);

    async fn json<T: DeserializeOwned>(self) -> T;
}

impl ResponseExt for Response {
    #[track_caller]
    fn assert_status(&self, status: StatusCode) {
        assert_eq!(self.status(), status);
    }

    async fn json<T: DeserializeOwned>(self) -> T {
        let bytes = axum::body::to_bytes(self.into_body(), usize::MAX)
            .await
            .expect("could not read the response body");
        serde_json::from_slice(&bytes).expect("could not parse the response body")
    }
}
