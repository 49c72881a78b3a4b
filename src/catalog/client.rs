//! HTTP catalog client.
//!
//! Fetches a catalog document from a remote URL.

use crate::catalog::models::{Project, parse_catalog};
use crate::error::CatalogError;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

/// Client for downloading a project catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    /// HTTP client for catalog requests
    client: Client,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Returns
    /// * `Result<CatalogClient>` - New client or error
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch and parse the catalog at `url`.
    ///
    /// # Arguments
    /// * `url` - Location of the catalog JSON
    ///
    /// # Returns
    /// * `Result<Vec<Project>>` - Validated projects or error
    ///
    /// # Details
    /// Any non-2xx response is reported as [`CatalogError::Http`].
    pub async fn fetch_projects(&self, url: &str) -> Result<Vec<Project>> {
        log::info!("Fetching catalog from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send catalog request to {}", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .context("Failed to read catalog response body")?;

        parse_catalog(&body).with_context(|| format!("Failed to parse catalog from {}", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogSource, load_catalog};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return its URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/projects.json", addr)
    }

    #[tokio::test]
    async fn test_fetch_projects_not_found() {
        let url = serve_once("404 Not Found", "").await;

        let err = CatalogClient::new()
            .unwrap()
            .fetch_projects(&url)
            .await
            .unwrap_err();
        match err.downcast_ref::<CatalogError>() {
            Some(CatalogError::Http { status, url: failed }) => {
                assert_eq!(*status, 404);
                assert_eq!(failed, &url);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_catalog_from_url() {
        let url = serve_once(
            "200 OK",
            r#"{"projects": [{"id": 1, "name": "Clean River", "policies": ["Water Conservation"]},
                             {"id": 2, "name": "Solar Grid", "sdgs": ["SDG 2"]}]}"#,
        )
        .await;

        let projects = load_catalog(&CatalogSource::Url(url)).await.unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "Clean River");
        assert!(projects[1].has_sdg("SDG 2"));
    }

    #[tokio::test]
    async fn test_fetch_projects_invalid_body() {
        let url = serve_once("200 OK", r#"[{"id": "one", "name": "A"}]"#).await;

        let err = CatalogClient::new()
            .unwrap()
            .fetch_projects(&url)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::InvalidFormat(_))
        ));
        assert!(format!("{:#}", err).contains("Failed to parse catalog from"));
    }
}
