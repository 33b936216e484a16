use config::shared::GlpiConfig;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::destination::base::UserDirectory;
use crate::error::{ErrorKind, SyncResult};
use crate::types::{DirectoryUser, FieldMap};
use crate::{bail, sync_error};

/// Header carrying the application token on every call.
const APP_TOKEN_HEADER: &str = "App-Token";

/// Header carrying the session token on every call after `initSession`.
const SESSION_TOKEN_HEADER: &str = "Session-Token";

/// Number of user records requested per listing page.
const LIST_PAGE_SIZE: usize = 200;

/// User directory backed by the GLPI REST API.
///
/// A session is opened once in [`GlpiDirectory::connect`] and reused for the
/// whole run; [`UserDirectory::end_session`] tears it down. Each mutating
/// call is a single attempt; there are no retries.
#[derive(Debug)]
pub struct GlpiDirectory {
    http: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

#[derive(Debug, Deserialize)]
struct InitSessionResponse {
    session_token: String,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: u64,
}

impl GlpiDirectory {
    /// Opens a GLPI API session.
    ///
    /// Authenticates `initSession` with the application token and the user
    /// token; the returned session token is attached to every later call.
    pub async fn connect(config: &GlpiConfig) -> SyncResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        info!(base_url, "opening GLPI session");

        let http = reqwest::Client::builder().build().map_err(|err| {
            sync_error!(
                ErrorKind::DestinationConnectionFailed,
                "HTTP client could not be built",
                source: err
            )
        })?;

        let response = http
            .get(format!("{base_url}/initSession"))
            .header(APP_TOKEN_HEADER, header_value(config.app_token.expose_secret())?)
            .header(
                AUTHORIZATION,
                header_value(&format!("user_token {}", config.user_token.expose_secret()))?,
            )
            .send()
            .await
            .map_err(|err| {
                sync_error!(
                    ErrorKind::DestinationConnectionFailed,
                    "GLPI session could not be opened",
                    source: err
                )
            })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            bail!(
                ErrorKind::AuthenticationError,
                "GLPI rejected the session tokens"
            );
        }
        let response = checked(response, "initSession").await?;

        let session: InitSessionResponse = response.json().await.map_err(|err| {
            sync_error!(
                ErrorKind::DeserializationError,
                "GLPI session response could not be decoded",
                source: err
            )
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            APP_TOKEN_HEADER,
            header_value(config.app_token.expose_secret())?,
        );
        headers.insert(SESSION_TOKEN_HEADER, header_value(&session.session_token)?);

        info!("GLPI session opened");

        Ok(Self {
            http,
            base_url,
            headers,
        })
    }

    fn user_url(&self) -> String {
        format!("{}/User", self.base_url)
    }
}

impl UserDirectory for GlpiDirectory {
    fn name() -> &'static str {
        "glpi"
    }

    async fn list_users(&self) -> SyncResult<Vec<DirectoryUser>> {
        let mut users = Vec::new();
        let mut start = 0usize;

        loop {
            let range = format!("{start}-{}", start + LIST_PAGE_SIZE - 1);
            let response = self
                .http
                .get(self.user_url())
                .headers(self.headers.clone())
                .query(&[("range", range.as_str())])
                .send()
                .await
                .map_err(|err| {
                    sync_error!(
                        ErrorKind::DestinationOperationFailed,
                        "GLPI user listing failed",
                        source: err
                    )
                })?;
            let response = checked(response, "user listing").await?;

            let page: Vec<DirectoryUser> = response.json().await.map_err(|err| {
                sync_error!(
                    ErrorKind::DeserializationError,
                    "GLPI user listing could not be decoded",
                    source: err
                )
            })?;

            let page_len = page.len();
            users.extend(page);

            if page_len < LIST_PAGE_SIZE {
                break;
            }
            start += LIST_PAGE_SIZE;
        }

        Ok(users)
    }

    async fn create_user(&self, payload: FieldMap) -> SyncResult<u64> {
        let response = self
            .http
            .post(self.user_url())
            .headers(self.headers.clone())
            .json(&json!({ "input": payload }))
            .send()
            .await
            .map_err(|err| {
                sync_error!(
                    ErrorKind::DestinationOperationFailed,
                    "GLPI user creation failed",
                    source: err
                )
            })?;
        let response = checked(response, "user creation").await?;

        let created: CreatedResponse = response.json().await.map_err(|err| {
            sync_error!(
                ErrorKind::DeserializationError,
                "GLPI creation response could not be decoded",
                source: err
            )
        })?;

        Ok(created.id)
    }

    async fn update_user(&self, payload: FieldMap) -> SyncResult<()> {
        let response = self
            .http
            .put(self.user_url())
            .headers(self.headers.clone())
            .json(&json!({ "input": payload }))
            .send()
            .await
            .map_err(|err| {
                sync_error!(
                    ErrorKind::DestinationOperationFailed,
                    "GLPI user update failed",
                    source: err
                )
            })?;
        checked(response, "user update").await?;

        Ok(())
    }

    async fn end_session(&self) -> SyncResult<()> {
        let response = self
            .http
            .get(format!("{}/killSession", self.base_url))
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|err| {
                sync_error!(
                    ErrorKind::DestinationSessionFailed,
                    "GLPI session teardown failed",
                    source: err
                )
            })?;

        if !response.status().is_success() {
            bail!(
                ErrorKind::DestinationSessionFailed,
                "GLPI session teardown was rejected",
                format!("status={}", response.status())
            );
        }

        Ok(())
    }
}

/// Rejects non-success responses, capturing the status and body as detail.
async fn checked(response: Response, operation: &'static str) -> SyncResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(sync_error!(
        ErrorKind::DestinationOperationFailed,
        "GLPI request was rejected",
        format!("operation={operation} status={status} body={body}")
    ))
}

fn header_value(value: &str) -> SyncResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|err| {
        sync_error!(
            ErrorKind::ConfigError,
            "Token contains characters not allowed in an HTTP header",
            source: err
        )
    })
}
