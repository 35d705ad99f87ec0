//! Prismic REST API v2 client

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ClientError, ContentSource, Cursor, PageOptions, RawPage, RawRecord};

/// `GET {endpoint}` response, trimmed to what we read
#[derive(Debug, Deserialize)]
struct ApiInfo {
    #[serde(default)]
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

/// `GET {endpoint}/documents/search` response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawRecord>,
    #[serde(default)]
    next_page: Option<String>,
}

/// Client for a Prismic repository, e.g. `https://my-blog.cdn.prismic.io/api/v2`
///
/// Cursors handed out by this client are the absolute `next_page` URLs
/// returned by the search endpoint.
#[derive(Debug, Clone)]
pub struct PrismicClient {
    client: Client,
    endpoint: String,
    access_token: Option<String>,
}

impl PrismicClient {
    /// Create a new client for an API endpoint
    pub fn new(endpoint: &str, access_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_token: access_token.filter(|token| !token.is_empty()),
        }
    }

    /// API endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Resolve the ref of the currently published content
    async fn master_ref(&self) -> Result<String, ClientError> {
        let info: ApiInfo = self.get_json(&self.endpoint, &[]).await?;
        info.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or(ClientError::MissingMasterRef)
    }

    async fn search(&self, query: String, page_size: u32) -> Result<SearchResponse, ClientError> {
        let reference = self.master_ref().await?;
        let url = format!("{}/documents/search", self.endpoint);
        self.get_json(
            &url,
            &[
                ("ref", reference),
                ("q", query),
                ("pageSize", page_size.to_string()),
            ],
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let mut request = self.client.get(url).query(query);
        if let Some(token) = &self.access_token {
            if !url.contains("access_token=") {
                request = request.query(&[("access_token", token)]);
            }
        }

        tracing::debug!("GET {}", url);
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Quote a value for a Prismic predicate
fn predicate_literal(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn get_page(
        &self,
        document_type: &str,
        options: &PageOptions,
    ) -> Result<RawPage, ClientError> {
        let response = match &options.cursor {
            Some(cursor) => self.get_json(cursor.as_str(), &[]).await?,
            None => {
                let query = format!("[[at(document.type,{})]]", predicate_literal(document_type));
                self.search(query, options.page_size).await?
            }
        };

        tracing::debug!(
            "Fetched {} {} document(s), more pages: {}",
            response.results.len(),
            document_type,
            response.next_page.is_some()
        );

        Ok(RawPage {
            results: response.results,
            next_page: response.next_page.map(Cursor::new),
        })
    }

    async fn get_by_uid(
        &self,
        document_type: &str,
        uid: &str,
    ) -> Result<Option<RawRecord>, ClientError> {
        let query = format!(
            "[[at(my.{}.uid,{})]]",
            document_type,
            predicate_literal(uid)
        );
        let response = self.search(query, 1).await?;
        Ok(response.results.into_iter().next())
    }
}
