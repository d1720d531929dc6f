//! Upstream API access.

use crate::config::ExtractConfig;
use crate::error::{ErdError, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::link::RawLinkTarget;

/// Table as returned by the table listing endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTable {
    pub id: u64,
    pub name: String,
    /// Set by the all-tables listing, which spans every database the token can see
    #[serde(default)]
    pub database_id: Option<u64>,
}

/// Field as returned by the field listing endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawField {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub link_row_table: Option<RawLinkTarget>,
}

/// Read access to the table and field listings of a database.
pub trait SchemaSource {
    fn list_tables(&self, database_id: u64) -> Result<Vec<RawTable>>;
    fn list_fields(&self, table_id: u64) -> Result<Vec<RawField>>;
}

impl<T: SchemaSource + ?Sized> SchemaSource for &T {
    fn list_tables(&self, database_id: u64) -> Result<Vec<RawTable>> {
        (**self).list_tables(database_id)
    }

    fn list_fields(&self, table_id: u64) -> Result<Vec<RawField>> {
        (**self).list_fields(table_id)
    }
}

/// Blocking HTTP client for the Baserow REST API
pub struct BaserowClient {
    http: Client,
    base_url: Url,
}

impl BaserowClient {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let mut value = HeaderValue::from_str(&format!("Token {}", config.token))
            .map_err(|_| ErdError::Auth("token contains invalid header characters".to_string()))?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("baserow-erd/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ErdError::Transport {
                url: config.base_url.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ErdError::Config(format!("cannot build URL for {path}: {e}")))
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(%url, "GET");
        let resp = self
            .http
            .get(url.clone())
            .send()
            .map_err(|source| ErdError::Transport {
                url: url.to_string(),
                source,
            })?;

        check_response(resp, &url)?
            .json()
            .map_err(|source| ErdError::Transport {
                url: url.to_string(),
                source,
            })
    }
}

impl SchemaSource for BaserowClient {
    fn list_tables(&self, database_id: u64) -> Result<Vec<RawTable>> {
        let url = self.endpoint("api/database/tables/all-tables/")?;
        let tables: Vec<RawTable> = self.get_json(url)?;

        Ok(tables
            .into_iter()
            .filter(|t| t.database_id.map_or(true, |id| id == database_id))
            .collect())
    }

    fn list_fields(&self, table_id: u64) -> Result<Vec<RawField>> {
        let url = self.endpoint(&format!("api/database/fields/table/{table_id}/"))?;
        self.get_json(url)
    }
}

/// Map non-success responses to errors.
///
/// 401 and 403 mean the token was rejected; any other non-success status is
/// an upstream failure carrying the response body.
fn check_response(resp: Response, url: &Url) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp.text().unwrap_or_default();
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(ErdError::Auth(format!(
            "{url} rejected the token ({status}): {message}"
        )));
    }

    Err(ErdError::Upstream {
        status: status.as_u16(),
        url: url.to_string(),
        message,
    })
}
