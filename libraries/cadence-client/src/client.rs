//! Main Cadence backend client.

use crate::config::BaasConfig;
use crate::error::{ClientError, Result};
use crate::playlists::PlaylistsClient;
use crate::radio::RadioPicker;
use crate::songs::SongsClient;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, info};

/// REST prefix of the hosted database API
const REST_PATH: &str = "rest/v1";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the hosted backend (PostgREST-style REST API).
///
/// Every request carries the project API key plus a bearer token (the
/// signed-in user's when configured, the API key otherwise).
///
/// The client implements [`RadioSource`](cadence_core::RadioSource) and
/// [`PlaylistStore`](cadence_core::PlaylistStore), so an `Arc<BaasClient>`
/// can be handed straight to the playback controller.
///
/// # Example
///
/// ```ignore
/// use cadence_client::{BaasClient, BaasConfig};
///
/// let client = BaasClient::new(BaasConfig::load()?)?;
///
/// let jazz = client.songs().top_by_genre("jazz", 10).await?;
/// println!("Top jazz: {} tracks", jazz.len());
/// ```
pub struct BaasClient {
    http: Client,
    base_url: String,
    api_key: String,
    bearer_token: String,
    radio_pool_size: usize,
    picker: RadioPicker,
}

impl BaasClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BaasConfig) -> Result<Self> {
        config.validate()?;

        // Parse and normalize URL
        let base_url = config.url.trim().trim_end_matches('/').to_string();

        let timeout = config.request_timeout();
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .user_agent(format!("Cadence/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(url = %base_url, authenticated = config.access_token.is_some(), "Backend client ready");

        Ok(Self {
            http,
            bearer_token: config.bearer_token().to_string(),
            api_key: config.api_key,
            base_url,
            radio_pool_size: config.radio_pool_size,
            picker: RadioPicker::new(),
        })
    }

    /// Replace the radio picker, e.g. with a seeded one for reproducible picks.
    #[must_use]
    pub fn with_radio_picker(mut self, picker: RadioPicker) -> Self {
        self.picker = picker;
        self
    }

    /// Get the backend URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Songs queries.
    pub fn songs(&self) -> SongsClient<'_> {
        SongsClient::new(self)
    }

    /// Playlist mutations.
    pub fn playlists(&self) -> PlaylistsClient<'_> {
        PlaylistsClient::new(self)
    }

    pub(crate) fn radio_pool_size(&self) -> usize {
        self.radio_pool_size
    }

    pub(crate) fn picker(&self) -> &RadioPicker {
        &self.picker
    }

    /// Authenticated request against a table endpoint
    pub(crate) fn table(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/{}/{}", self.base_url, REST_PATH, table);
        debug!(method = %method, url = %url, "Backend request");

        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.bearer_token)
    }

    /// Send a request, turning transport failures and non-2xx responses into errors
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::ServerUnreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), message = %message, "Backend error response");
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

impl std::fmt::Debug for BaasClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaasClient")
            .field("base_url", &self.base_url)
            .field("radio_pool_size", &self.radio_pool_size)
            .finish_non_exhaustive()
    }
}
