use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use miruro_core::models::{Anime, SearchPage};

use super::error::CatalogError;
use super::types::{ConsumetAnime, PageResponse};
use crate::traits::CatalogService;

pub const DEFAULT_BASE_URL: &str = "https://api.consumet.org";

/// Path prefix of the AniList-backed meta provider.
const PROVIDER_PATH: &str = "meta/anilist";

/// Client for a Consumet-style catalog API.
#[derive(Debug, Clone)]
pub struct ConsumetClient {
    base_url: Url,
    http: Client,
}

impl ConsumetClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        // A trailing slash keeps `Url::join` from replacing the last segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|e| CatalogError::BaseUrl(format!("{base_url}: {e}")))?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/meta/anilist/{path}?{params}`.
    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, CatalogError> {
        let mut url = self
            .base_url
            .join(&format!("{PROVIDER_PATH}/{path}"))
            .map_err(|e| CatalogError::BaseUrl(e.to_string()))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn search_url(&self, query: &str, page: u32, per_page: u32) -> Result<Url, CatalogError> {
        self.endpoint(
            "advanced-search",
            &[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("perPage", per_page.to_string()),
            ],
        )
    }

    fn trending_url(&self, page: u32, per_page: u32) -> Result<Url, CatalogError> {
        self.endpoint(
            "trending",
            &[("page", page.to_string()), ("perPage", per_page.to_string())],
        )
    }

    fn info_url(&self, id: &str) -> Result<Url, CatalogError> {
        let mut url = self.endpoint("info", &[])?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::BaseUrl(self.base_url.to_string()))?
            .push(id);
        Ok(url)
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "catalog API error");
            Err(CatalogError::Api {
                status,
                message: body,
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        tracing::debug!(%url, "catalog request");
        let resp = self.http.get(url).send().await?;
        let resp = Self::check_response(resp).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

impl CatalogService for ConsumetClient {
    type Error = CatalogError;

    async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchPage, CatalogError> {
        let url = self.search_url(query, page, per_page)?;
        let resp: PageResponse = self.get_json(url).await?;
        let page = resp.into_search_page();
        tracing::debug!(
            query,
            page = page.current_page,
            results = page.results.len(),
            "search complete"
        );
        Ok(page)
    }

    async fn trending(&self, page: u32, per_page: u32) -> Result<SearchPage, CatalogError> {
        let url = self.trending_url(page, per_page)?;
        let resp: PageResponse = self.get_json(url).await?;
        Ok(resp.into_search_page())
    }

    async fn info(&self, id: &str) -> Result<Anime, CatalogError> {
        let url = self.info_url(id)?;
        let media: ConsumetAnime = self.get_json(url).await?;
        Ok(media.into_anime())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client(base: &str) -> ConsumetClient {
        ConsumetClient::new(base, Duration::from_secs(5)).unwrap()
    }

    /// Serve exactly one canned HTTP response and hand back the request line.
    async fn serve_once(status: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            request.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{addr}"), handle)
    }

    #[test]
    fn test_search_url() {
        let c = client("https://api.example.org/");
        let url = c.search_url("one piece", 2, 24).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.org/meta/anilist/advanced-search?query=one+piece&page=2&perPage=24"
        );
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let c = client("http://localhost:3000/api");
        let url = c.trending_url(1, 10).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/meta/anilist/trending?page=1&perPage=10"
        );
    }

    #[test]
    fn test_info_url_escapes_id() {
        let c = client("https://api.example.org");
        let url = c.info_url("a/b").unwrap();
        assert_eq!(url.as_str(), "https://api.example.org/meta/anilist/info/a%2Fb");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ConsumetClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(err, Err(CatalogError::BaseUrl(_))));
    }

    #[tokio::test]
    async fn test_search_success() {
        let body = r#"{"currentPage":1,"hasNextPage":false,"results":[{"id":"5","title":{"english":"Naruto"}}]}"#;
        let (base, server) = serve_once("200 OK", body).await;

        let page = client(&base).search("naruto", 1, 5).await.unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].display_title(), "Naruto");
        assert!(!page.has_next_page);

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with(
            "GET /meta/anilist/advanced-search?query=naruto&page=1&perPage=5"
        ));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_api_error() {
        let (base, server) = serve_once("500 Internal Server Error", "boom").await;

        let err = client(&base).trending(1, 24).await.unwrap_err();
        match err {
            CatalogError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_bad_body_maps_to_parse_error() {
        let (base, server) = serve_once("200 OK", "<html>").await;

        let err = client(&base).info("1").await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        server.await.unwrap();
    }
}
