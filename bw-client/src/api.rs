use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use bw::{Recipe, RecipeId, RecipeStore, RecipeUpdate, StoreError, StoreResult};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::RetryIf;

use crate::auth::{NewUser, Token, TokenStore, User};
use crate::config::Config;

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Transport(e.into())
}

/// Map a failed response to the store's error taxonomy.
fn classify(status: StatusCode, body: String) -> StoreError {
    match status {
        StatusCode::UNAUTHORIZED => StoreError::Unauthorized,
        StatusCode::NOT_FOUND => StoreError::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => StoreError::Validation(body),
        other => StoreError::Server {
            status: other.as_u16(),
            message: body,
        },
    }
}

/// The recipe service over HTTP, authenticated with the stored bearer token.
#[derive(Clone)]
pub struct HttpRecipeStore {
    client: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
    retries: usize,
}

impl HttpRecipeStore {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()
            .context("Building HTTP client")?;
        Ok(Self {
            client,
            base_url: config.server.base_url.trim_end_matches('/').to_owned(),
            tokens: TokenStore::new(&config.session.token_path),
            retries: config.http.retries,
        })
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.endpoint(path));
        match self.tokens.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and turn error statuses into `StoreError`s. A 401 logs the user out.
    async fn send(&self, builder: RequestBuilder) -> StoreResult<Response> {
        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let error = classify(status, body);
        if matches!(error, StoreError::Unauthorized) {
            tracing::warn!("Session rejected by the server, logging out");
            if let Err(e) = self.tokens.clear() {
                tracing::warn!("{e:#}");
            }
        }
        Err(error)
    }

    async fn json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> StoreResult<T> {
        self.send(builder).await?.json().await.map_err(transport)
    }

    /// GET with retries. Only transient failures are retried, with delays
    /// doubling from 50ms.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> StoreResult<T> {
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(25)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(self.retries);
        RetryIf::spawn(
            strategy,
            || self.json(self.request(Method::GET, path)),
            |e: &StoreError| {
                let transient = e.is_transient();
                if transient {
                    tracing::debug!("Retrying GET {path}: {e}");
                }
                transient
            },
        )
        .await
    }

    /// Exchange credentials for a token and remember it.
    pub async fn login(&self, email: &str, password: &str) -> StoreResult<()> {
        let form = [("username", email), ("password", password)];
        let request = self.client.post(self.endpoint("/token")).form(&form);
        let token: Token = self.json(request).await?;
        tracing::debug!(token_type = %token.token_type, "Logged in");
        self.tokens.save(&token.access_token)?;
        Ok(())
    }

    pub async fn register(&self, user: &NewUser) -> StoreResult<User> {
        let request = self.client.post(self.endpoint("/users/")).json(user);
        self.json(request).await
    }

    pub fn logout(&self) -> anyhow::Result<()> {
        self.tokens.clear()
    }

    /// The account the stored token belongs to.
    pub async fn current_user(&self) -> StoreResult<User> {
        self.get_json("/users/me").await
    }
}

#[async_trait]
impl RecipeStore for HttpRecipeStore {
    async fn list_recipes(&self) -> StoreResult<Vec<Recipe>> {
        self.get_json("/recipes/").await
    }

    async fn get_recipe(&self, id: RecipeId) -> StoreResult<Recipe> {
        self.get_json(&format!("/recipes/{id}")).await
    }

    async fn update_recipe(&self, id: RecipeId, update: &RecipeUpdate) -> StoreResult<Recipe> {
        let request = self.request(Method::PUT, &format!("/recipes/{id}"));
        self.json(request.json(update)).await
    }

    async fn delete_recipe(&self, id: RecipeId) -> StoreResult<()> {
        let request = self.request(Method::DELETE, &format!("/recipes/{id}"));
        self.send(request).await?;
        Ok(())
    }

    async fn import_recipe(&self, url: &str) -> StoreResult<Recipe> {
        let request = self.request(Method::POST, "/recipes/from-url");
        self.json(request.query(&[("url", url)])).await
    }
}
