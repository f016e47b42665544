//! Signed request authentication
//!
//! Every caller-scoped request carries the claimed identity, a unix timestamp
//! and an EIP-191 personal signature over
//! `{METHOD} {path}\n{timestamp}\n{keccak256(body)}`. The node recovers the
//! signer from the signature and only accepts the request when it matches the
//! claimed identity and the timestamp is within [`MAX_CLOCK_SKEW_SECONDS`].

use alloy::hex;
use alloy::primitives::{keccak256, Address, Signature};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::accounts::parse_address;
use crate::error::{AppError, AppResult};

/// Header carrying the calling identity
pub const CALLER_HEADER: &str = "x-caller";
pub const SIGNATURE_HEADER: &str = "x-signature";
pub const TIMESTAMP_HEADER: &str = "x-timestamp";

pub const MAX_CLOCK_SKEW_SECONDS: i64 = 300;

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Identity proven by a valid request signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedCaller(pub Address);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub caller: Address,
    pub timestamp: i64,
    pub signature: String,
}

pub fn signing_message(method: &str, path: &str, timestamp: i64, body: &[u8]) -> String {
    format!(
        "{} {}\n{}\n{}",
        method.to_uppercase(),
        path,
        timestamp,
        keccak256(body)
    )
}

pub fn sign_request(
    signer: &PrivateKeySigner,
    method: &str,
    path: &str,
    timestamp: i64,
    body: &[u8],
) -> AppResult<SignedHeaders> {
    let message = signing_message(method, path, timestamp, body);
    let signature = signer
        .sign_message_sync(message.as_bytes())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to sign request: {}", e)))?;

    Ok(SignedHeaders {
        caller: signer.address(),
        timestamp,
        signature: hex::encode_prefixed(signature.as_bytes()),
    })
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> AppResult<&'a str> {
    headers
        .get(name)
        .ok_or_else(|| AppError::InvalidSignature(format!("missing {} header", name)))?
        .to_str()
        .map_err(|_| AppError::InvalidSignature(format!("malformed {} header", name)))
}

/// Check the signature headers of a request and return the proven identity
pub fn verify_request(
    headers: &HeaderMap,
    method: &str,
    path: &str,
    body: &[u8],
    now: i64,
) -> AppResult<Address> {
    let claimed = parse_address(header(headers, CALLER_HEADER)?)
        .map_err(|e| AppError::InvalidSignature(e.to_string()))?;
    let timestamp: i64 = header(headers, TIMESTAMP_HEADER)?
        .parse()
        .map_err(|_| AppError::InvalidSignature(format!("malformed {} header", TIMESTAMP_HEADER)))?;

    if (now - timestamp).abs() > MAX_CLOCK_SKEW_SECONDS {
        return Err(AppError::InvalidSignature(format!(
            "request timestamp {} is outside the accepted window",
            timestamp
        )));
    }

    let raw = hex::decode(header(headers, SIGNATURE_HEADER)?)
        .map_err(|e| AppError::InvalidSignature(format!("signature is not hex: {}", e)))?;
    let signature = Signature::try_from(raw.as_slice())
        .map_err(|e| AppError::InvalidSignature(format!("malformed signature: {}", e)))?;

    let message = signing_message(method, path, timestamp, body);
    let recovered = signature
        .recover_address_from_msg(message.as_bytes())
        .map_err(|e| AppError::InvalidSignature(format!("unrecoverable signature: {}", e)))?;

    if recovered != claimed {
        warn!("Signature of {} claims to be {}", recovered, claimed);
        return Err(AppError::InvalidSignature(format!(
            "signature does not belong to {}",
            claimed
        )));
    }
    Ok(claimed)
}

/// Middleware for caller-scoped routes: buffers the body, verifies the
/// signature and hands the proven identity to the handler as an extension
pub async fn require_signature(request: Request, next: Next) -> Result<Response, AppError> {
    let (mut parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read request body: {}", e)))?;

    let now = chrono::Utc::now().timestamp();
    let caller = verify_request(
        &parts.headers,
        parts.method.as_str(),
        parts.uri.path(),
        &bytes,
        now,
    )?;
    debug!("Request authenticated for {}", caller);

    parts.extensions.insert(AuthenticatedCaller(caller));
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::dev_signer;
    use axum::http::HeaderValue;

    fn headers_for(signed: &SignedHeaders) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CALLER_HEADER, HeaderValue::from_str(&signed.caller.to_string()).unwrap());
        headers.insert(TIMESTAMP_HEADER, HeaderValue::from(signed.timestamp));
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(&signed.signature).unwrap());
        headers
    }

    #[test]
    fn test_valid_signature_recovers_caller() {
        let signer = dev_signer(2).unwrap();
        let signed = sign_request(&signer, "POST", "/api/v1/income", 1_000, b"{}").unwrap();

        let caller =
            verify_request(&headers_for(&signed), "POST", "/api/v1/income", b"{}", 1_010).unwrap();
        assert_eq!(caller, signer.address());
    }

    #[test]
    fn test_claiming_another_identity_fails() {
        let signer = dev_signer(2).unwrap();
        let owner = dev_signer(0).unwrap().address();
        let mut signed = sign_request(&signer, "POST", "/api/v1/analysis", 1_000, b"").unwrap();
        signed.caller = owner;

        let result = verify_request(&headers_for(&signed), "POST", "/api/v1/analysis", b"", 1_000);
        assert!(matches!(result, Err(AppError::InvalidSignature(_))));
    }

    #[test]
    fn test_tampered_body_or_path_fails() {
        let signer = dev_signer(1).unwrap();
        let signed = sign_request(&signer, "POST", "/api/v1/analysts", 1_000, b"{\"a\":1}").unwrap();
        let headers = headers_for(&signed);

        assert!(verify_request(&headers, "POST", "/api/v1/analysts", b"{\"a\":2}", 1_000).is_err());
        assert!(verify_request(&headers, "POST", "/api/v1/artists", b"{\"a\":1}", 1_000).is_err());
        assert!(verify_request(&headers, "GET", "/api/v1/analysts", b"{\"a\":1}", 1_000).is_err());
    }

    #[test]
    fn test_stale_timestamp_fails() {
        let signer = dev_signer(1).unwrap();
        let signed = sign_request(&signer, "GET", "/api/v1/profile", 1_000, b"").unwrap();

        let result = verify_request(
            &headers_for(&signed),
            "GET",
            "/api/v1/profile",
            b"",
            1_000 + MAX_CLOCK_SKEW_SECONDS + 1,
        );
        assert!(matches!(result, Err(AppError::InvalidSignature(_))));
    }

    #[test]
    fn test_unsigned_request_fails() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CALLER_HEADER,
            HeaderValue::from_str(&dev_signer(0).unwrap().address().to_string()).unwrap(),
        );

        let result = verify_request(&headers, "POST", "/api/v1/analysis", b"", 1_000);
        assert!(matches!(result, Err(AppError::InvalidSignature(_))));
    }
}
