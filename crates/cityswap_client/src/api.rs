//! The network seam the polling loop drives
//!
//! [`SwapApi`] is the injectable dependency; [`HttpSwapApi`] is the real
//! implementation against the REST surface. Tests script the trait directly.

use async_trait::async_trait;
use cityswap_api::{
    requests::{CreateSwapRequest, MatchRequest},
    responses::{CancelResponse, MatchResponse, StatusResponse, SwapResponse},
};
use cityswap_core::{SettlementKind, SwapId, SwapIntent, UserId};
use miette::Diagnostic;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ClientError {
    /// Network-level failure; the polling loop treats this as transient
    #[error("Transport error: {message}")]
    #[diagnostic(code(cityswap_client::transport), help("Retried on the next poll tick"))]
    Transport { message: String },

    /// The server answered with an error envelope
    #[error("API error ({status}): {message}")]
    #[diagnostic(code(cityswap_client::api))]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[async_trait]
pub trait SwapApi: Send + Sync {
    async fn create(&self, kind: SettlementKind, amount: u64) -> ClientResult<SwapIntent>;

    async fn status(&self, swap: SwapId) -> ClientResult<StatusResponse>;

    async fn attempt_match(&self, a: SwapId, b: SwapId) -> ClientResult<MatchResponse>;

    async fn cancel(&self, swap: SwapId) -> ClientResult<()>;
}

/// REST implementation of [`SwapApi`]
pub struct HttpSwapApi {
    http: reqwest::Client,
    base_url: String,
    user: UserId,
}

impl HttpSwapApi {
    pub fn new(base_url: impl Into<String>, user: UserId) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            user,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Error envelopes are {success:false, error, message}
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| status.to_string());

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl SwapApi for HttpSwapApi {
    async fn create(&self, kind: SettlementKind, amount: u64) -> ClientResult<SwapIntent> {
        let response = self
            .http
            .post(self.url("/swaps"))
            .bearer_auth(self.user)
            .json(&CreateSwapRequest { kind, amount })
            .send()
            .await?;
        let body: SwapResponse = Self::parse(response).await?;
        Ok(body.swap)
    }

    async fn status(&self, swap: SwapId) -> ClientResult<StatusResponse> {
        let response = self
            .http
            .get(self.url(&format!("/swaps/{swap}/status")))
            .bearer_auth(self.user)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn attempt_match(&self, a: SwapId, b: SwapId) -> ClientResult<MatchResponse> {
        let response = self
            .http
            .post(self.url("/swaps/match"))
            .bearer_auth(self.user)
            .json(&MatchRequest {
                intent_a: a,
                intent_b: b,
            })
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn cancel(&self, swap: SwapId) -> ClientResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/swaps/{swap}")))
            .bearer_auth(self.user)
            .send()
            .await?;
        let _: CancelResponse = Self::parse(response).await?;
        Ok(())
    }
}
