//! Signed HTTP layer for the futures REST API.
//!
//! Signed endpoints take their parameters in the query string, carry a
//! millisecond timestamp plus `recvWindow`, and append an HMAC-SHA256
//! signature over the exact query string. The API key travels in the
//! `X-MBX-APIKEY` header.

use reqwest::{Client, Method, StatusCode};
use ring::hmac;
use serde::de::DeserializeOwned;

use super::api_types::ApiErrorResponse;
use super::config::BinanceConfig;
use super::error::BinanceError;

/// HTTP client for the futures API.
#[derive(Debug, Clone)]
pub struct BinanceHttpClient {
    client: Client,
    api_key: String,
    api_secret: String,
    base_url: String,
    recv_window_ms: u64,
}

impl BinanceHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &BinanceConfig) -> Result<Self, BinanceError> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(BinanceError::AuthenticationFailed);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BinanceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            base_url: config.rest_base_url(),
            recv_window_ms: config.recv_window_ms,
        })
    }

    /// Make an unsigned GET request.
    pub async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, BinanceError> {
        self.request(Method::GET, path, String::new()).await
    }

    /// Make a signed GET request.
    pub async fn get_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Vec<(&str, String)>,
    ) -> Result<T, BinanceError> {
        let query = self.signed_query(params);
        self.request(Method::GET, path, query).await
    }

    /// Make a signed POST request.
    pub async fn post_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Vec<(&str, String)>,
    ) -> Result<T, BinanceError> {
        let query = self.signed_query(params);
        self.request(Method::POST, path, query).await
    }

    /// Make a signed DELETE request.
    pub async fn delete_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Vec<(&str, String)>,
    ) -> Result<T, BinanceError> {
        let query = self.signed_query(params);
        self.request(Method::DELETE, path, query).await
    }

    /// Build the timestamped, signed query string.
    fn signed_query(&self, params: Vec<(&str, String)>) -> String {
        let timestamp = chrono::Utc::now().timestamp_millis();
        let mut query = encode_query(&params);
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&format!(
            "recvWindow={}&timestamp={timestamp}",
            self.recv_window_ms
        ));

        let signature = sign(&self.api_secret, &query);
        format!("{query}&signature={signature}")
    }

    /// Send one request and decode the response. No retries: a failure
    /// surfaces immediately to the caller.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: String,
    ) -> Result<T, BinanceError> {
        let url = if query.is_empty() {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}{path}?{query}", self.base_url)
        };

        let response = self
            .client
            .request(method, &url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await
            .map_err(|e| BinanceError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BinanceError::Network(e.to_string()))?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| BinanceError::JsonParse(e.to_string()));
        }

        Err(decode_error(status, &body))
    }
}

/// Map a non-2xx response to a typed error.
fn decode_error(status: StatusCode, body: &str) -> BinanceError {
    if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(body) {
        return BinanceError::from_api_code(err.code, err.msg, None);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BinanceError::AuthenticationFailed,
        _ => BinanceError::Api {
            code: i64::from(status.as_u16()),
            message: body.to_string(),
        },
    }
}

/// Join parameters into a query string.
///
/// Values are exchange-safe tokens (symbols, decimal numbers, enum names,
/// UUID-based IDs), so no percent-encoding is required; the signature is
/// computed over exactly these bytes.
fn encode_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// HMAC-SHA256 signature over the query string, lowercase hex.
fn sign(secret: &str, query: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let tag = hmac::sign(&key, query.as_bytes());
    hex_encode(tag.as_ref())
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_matches_exchange_documentation_vector() {
        // Reference vector from the exchange's signed-endpoint docs.
        let secret = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
        assert_eq!(
            sign(secret, query),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn encode_query_joins_pairs_in_order() {
        let params = vec![
            ("symbol", "BTCUSDT".to_string()),
            ("side", "BUY".to_string()),
            ("quantity", "0.001".to_string()),
        ];
        assert_eq!(encode_query(&params), "symbol=BTCUSDT&side=BUY&quantity=0.001");
    }

    #[test]
    fn encode_query_empty() {
        assert_eq!(encode_query(&[]), "");
    }

    #[test]
    fn hex_encode_lowercase() {
        assert_eq!(hex_encode(&[0x00, 0xab, 0xff]), "00abff");
    }

    #[test]
    fn empty_credentials_rejected() {
        let config = BinanceConfig::new(
            String::new(),
            String::new(),
            super::super::config::Environment::Testnet,
        );
        assert!(matches!(
            BinanceHttpClient::new(&config),
            Err(BinanceError::AuthenticationFailed)
        ));
    }

    #[test]
    fn decode_error_api_payload() {
        let err = decode_error(
            StatusCode::BAD_REQUEST,
            r#"{"code":-1121,"msg":"Invalid symbol."}"#,
        );
        assert!(matches!(err, BinanceError::Api { code: -1121, .. }));
    }

    #[test]
    fn decode_error_unauthorized_without_payload() {
        let err = decode_error(StatusCode::UNAUTHORIZED, "nope");
        assert!(matches!(err, BinanceError::AuthenticationFailed));
    }
}
