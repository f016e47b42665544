//! HTTP client for a running ledger node
//!
//! Rejections coming back from the node are turned into [`ContractError`]
//! again, so callers can tell an `AlreadyRegistered` apart from a transport
//! failure and decide whether a retry makes sense.

use alloy::primitives::{Address, B256};
use alloy::signers::local::PrivateKeySigner;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::api::{
    AuthorizeAnalystRequest, CountResponse, FlagResponse, OwnerResponse, RegisterArtistRequest,
};
use crate::auth::{sign_request, CALLER_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::error::{AppError, AppResult, ContractError};
use crate::node::{NodeStatus, TxReceipt};
use crate::types::{
    AggregateReport, ArtistProfile, CreativeAnalyticsRecord, IncomeRecord, PlatformStats, SessionId,
};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    kind: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NodeClient {
    http: Client,
    base_url: String,
    signer: Option<PrivateKeySigner>,
}

impl NodeClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            signer: None,
        })
    }

    /// Same client, signing scoped and state-changing calls with `signer`
    pub fn with_signer(&self, signer: PrivateKeySigner) -> Self {
        Self {
            signer: Some(signer),
            ..self.clone()
        }
    }

    pub fn caller(&self) -> Option<Address> {
        self.signer.as_ref().map(|s| s.address())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a caller-scoped request with its signature headers
    async fn send_signed<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> AppResult<Response> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            AppError::InvalidInput("this call needs a signing identity".to_string())
        })?;
        let bytes = match body {
            Some(body) => serde_json::to_vec(body)?,
            None => Vec::new(),
        };

        let timestamp = chrono::Utc::now().timestamp();
        let signed = sign_request(signer, method.as_str(), path, timestamp, &bytes)?;

        let mut request = self
            .http
            .request(method, self.url(path))
            .header(CALLER_HEADER, signed.caller.to_string())
            .header(TIMESTAMP_HEADER, signed.timestamp.to_string())
            .header(SIGNATURE_HEADER, signed.signature);
        if body.is_some() {
            request = request.header(CONTENT_TYPE, "application/json").body(bytes);
        }
        Ok(request.send().await?)
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response, session: SessionId) -> AppResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body: ErrorBody = response.json().await.unwrap_or(ErrorBody {
            error: status.to_string(),
            kind: None,
        });
        debug!("Node rejected request ({}): {}", status, body.error);

        let caller = self.caller().unwrap_or(Address::ZERO);
        if let Some(error) = body
            .kind
            .as_deref()
            .and_then(|kind| ContractError::from_kind(kind, caller, session))
        {
            return Err(error.into());
        }
        match body.kind.as_deref() {
            Some("InvalidInput") => return Err(AppError::InvalidInput(body.error)),
            Some("InvalidSignature") => return Err(AppError::InvalidSignature(body.error)),
            Some("NotFound") => return Err(AppError::NotFound(body.error)),
            _ => {}
        }
        Err(AppError::Remote {
            status: status.as_u16(),
            message: body.error,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.http.get(self.url(path)).send().await?;
        self.decode(response, 0).await
    }

    pub async fn health(&self) -> AppResult<bool> {
        let response = self.http.get(self.url("/health")).send().await?;
        Ok(response.status().is_success())
    }

    pub async fn node_status(&self) -> AppResult<NodeStatus> {
        self.get("/api/v1/node/status").await
    }

    pub async fn owner(&self) -> AppResult<Address> {
        Ok(self.get::<OwnerResponse>("/api/v1/owner").await?.owner)
    }

    pub async fn total_artists(&self) -> AppResult<u64> {
        Ok(self.get::<CountResponse>("/api/v1/total-artists").await?.value)
    }

    pub async fn analysis_session_id(&self) -> AppResult<SessionId> {
        Ok(self.get::<CountResponse>("/api/v1/session").await?.value)
    }

    pub async fn get_platform_stats(&self) -> AppResult<PlatformStats> {
        self.get("/api/v1/platform/stats").await
    }

    pub async fn is_registered_artist(&self, identity: Address) -> AppResult<bool> {
        let path = format!("/api/v1/artists/{}/registered", identity);
        Ok(self.get::<FlagResponse>(&path).await?.value)
    }

    pub async fn is_authorized_analyst(&self, identity: Address) -> AppResult<bool> {
        let path = format!("/api/v1/analysts/{}/authorized", identity);
        Ok(self.get::<FlagResponse>(&path).await?.value)
    }

    pub async fn get_receipt(&self, transaction_hash: B256) -> AppResult<TxReceipt> {
        self.get(&format!("/api/v1/receipts/{}", transaction_hash)).await
    }

    pub async fn get_my_profile(&self) -> AppResult<ArtistProfile> {
        let response = self
            .send_signed::<()>(Method::GET, "/api/v1/profile", None)
            .await?;
        self.decode(response, 0).await
    }

    pub async fn get_aggregate_report(&self, session: SessionId) -> AppResult<AggregateReport> {
        let path = format!("/api/v1/reports/{}", session);
        let response = self.send_signed::<()>(Method::GET, &path, None).await?;
        self.decode(response, session).await
    }

    pub async fn register_artist(&self, artist_id: &str) -> AppResult<TxReceipt> {
        let body = RegisterArtistRequest {
            artist_id: artist_id.to_string(),
        };
        let response = self
            .send_signed(Method::POST, "/api/v1/artists", Some(&body))
            .await?;
        self.decode(response, 0).await
    }

    pub async fn authorize_analyst(&self, analyst: Address) -> AppResult<TxReceipt> {
        let body = AuthorizeAnalystRequest { analyst };
        let response = self
            .send_signed(Method::POST, "/api/v1/analysts", Some(&body))
            .await?;
        self.decode(response, 0).await
    }

    pub async fn submit_income_data(&self, record: &IncomeRecord) -> AppResult<TxReceipt> {
        let response = self
            .send_signed(Method::POST, "/api/v1/income", Some(record))
            .await?;
        self.decode(response, 0).await
    }

    pub async fn submit_creative_analytics(
        &self,
        record: &CreativeAnalyticsRecord,
    ) -> AppResult<TxReceipt> {
        let response = self
            .send_signed(Method::POST, "/api/v1/creative-analytics", Some(record))
            .await?;
        self.decode(response, 0).await
    }

    pub async fn generate_income_analysis(&self) -> AppResult<TxReceipt> {
        let response = self
            .send_signed::<()>(Method::POST, "/api/v1/analysis", None)
            .await?;
        self.decode(response, 0).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = NodeClient::new("http://127.0.0.1:8545/", 5).unwrap();
        assert_eq!(client.url("/health"), "http://127.0.0.1:8545/health");
    }

    #[tokio::test]
    async fn test_scoped_call_without_caller_fails_locally() {
        let client = NodeClient::new("http://127.0.0.1:1", 1).unwrap();

        let result = client.generate_income_analysis().await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_with_signer_keeps_base_url() {
        let client = NodeClient::new("http://node:8545", 5).unwrap();
        let signer = crate::accounts::dev_signer(3).unwrap();
        let scoped = client.with_signer(signer.clone());

        assert_eq!(scoped.caller(), Some(signer.address()));
        assert_eq!(client.caller(), None);
        assert_eq!(scoped.url("/x"), "http://node:8545/x");
    }
}
