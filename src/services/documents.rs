use crate::models::Memory;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Default number of documents requested per page
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Errors that can occur when talking to the document store
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Collection IDs in the document store
#[derive(Debug, Clone)]
pub struct DocumentCollections {
    pub memories: String,
}

/// Connection details for the document store
#[derive(Debug, Clone)]
pub struct DocumentStoreConfig {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
    pub page_size: usize,
    pub timeout: Duration,
}

/// REST client for the Appwrite-style document database holding memories
///
/// Only reads are needed here: memory documents are listed (optionally
/// scoped to an album) and handed to the locator for in-memory filtering.
pub struct DocumentStoreClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    page_size: usize,
    client: Client,
    collections: DocumentCollections,
}

impl DocumentStoreClient {
    /// Create a new document store client
    pub fn new(
        config: DocumentStoreConfig,
        collections: DocumentCollections,
    ) -> Result<Self, DocumentStoreError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            project_id: config.project_id,
            database_id: config.database_id,
            page_size: config.page_size.max(1),
            client,
            collections,
        })
    }

    /// List every memory document, optionally restricted to one album
    ///
    /// Pages through the collection until the store reports no more
    /// documents. Documents that do not parse as a [`Memory`] are skipped.
    pub async fn list_memories(
        &self,
        album_id: Option<&str>,
    ) -> Result<Vec<Memory>, DocumentStoreError> {
        let mut memories = Vec::new();
        let mut offset = 0usize;

        loop {
            let page = self.fetch_page(album_id, offset).await?;
            let received = page.documents.len();
            offset += received;

            memories.extend(page.documents.into_iter().filter_map(|doc| {
                let data = doc.get("data").unwrap_or(&doc);
                match serde_json::from_value::<Memory>(data.clone()) {
                    Ok(memory) => Some(memory),
                    Err(e) => {
                        let id = doc.get("$id").and_then(|v| v.as_str()).unwrap_or("<unknown>");
                        tracing::warn!("Skipping malformed memory document {}: {}", id, e);
                        None
                    }
                }
            }));

            let exhausted = match page.total {
                Some(total) => offset as u64 >= total,
                None => false,
            };
            if received < self.page_size || exhausted {
                break;
            }
        }

        tracing::debug!(
            "Listed {} memories (album: {})",
            memories.len(),
            album_id.unwrap_or("*")
        );

        Ok(memories)
    }

    async fn fetch_page(
        &self,
        album_id: Option<&str>,
        offset: usize,
    ) -> Result<Page, DocumentStoreError> {
        let url = self.documents_url(&self.collections.memories, &memory_queries(album_id, self.page_size, offset));

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DocumentStoreError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(DocumentStoreError::NotFound(format!(
                "collection {}",
                self.collections.memories
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to list memories: {} - {}", status, body);
            return Err(DocumentStoreError::ApiError(format!(
                "Failed to list memories: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64());
        let documents = match json.get("documents") {
            Some(Value::Array(docs)) => docs.clone(),
            _ => {
                return Err(DocumentStoreError::InvalidResponse(
                    "Missing documents array".into(),
                ))
            }
        };

        Ok(Page { documents, total })
    }

    fn documents_url(&self, collection: &str, queries: &[String]) -> String {
        let query_string = queries
            .iter()
            .map(|q| format!("queries%5B%5D={}", urlencoding::encode(q)))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}/databases/{}/collections/{}/documents?{}",
            self.base_url, self.database_id, collection, query_string
        )
    }
}

struct Page {
    documents: Vec<Value>,
    total: Option<u64>,
}

/// Build the store queries for one page of memories
fn memory_queries(album_id: Option<&str>, limit: usize, offset: usize) -> Vec<String> {
    let mut queries = Vec::with_capacity(3);
    if let Some(album_id) = album_id {
        // serde_json quoting keeps ids with quotes or backslashes intact
        let quoted = Value::String(album_id.to_string()).to_string();
        queries.push(format!("equal(\"albumId\", [{}])", quoted));
    }
    queries.push(format!("limit({})", limit));
    queries.push(format!("offset({})", offset));
    queries
}
