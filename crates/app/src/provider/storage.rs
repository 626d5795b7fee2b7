//! Object storage for product images.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Method, Url, header::CONTENT_TYPE};
use serde_json::json;
use tracing::{debug, info};

use crate::provider::{Access, ProviderClient, ProviderError};

/// Storage client bound to one bucket.
#[derive(Debug, Clone)]
pub struct StorageClient {
    client: ProviderClient,
    bucket: String,
}

impl StorageClient {
    /// Client for the configured image bucket.
    #[must_use]
    pub fn images(client: ProviderClient) -> Self {
        let bucket = client.config().image_bucket.clone();

        Self { client, bucket }
    }

    /// Public URL of the object at `path`. Each `/`-separated segment is percent-encoded.
    #[must_use]
    pub fn public_url(&self, path: &str) -> String {
        self.object_url(true, path).into()
    }

    /// Object path for a public URL produced by [`StorageClient::public_url`].
    #[must_use]
    pub fn path_from_url(&self, url: &str) -> Option<String> {
        let url = Url::parse(url).ok()?;
        let prefix = self.object_url(true, "");

        if url.origin() != prefix.origin() {
            return None;
        }

        let path = url.path().strip_prefix(prefix.path())?;

        if path.is_empty() {
            return None;
        }

        Some(
            path.split('/')
                .map(percent_decode)
                .collect::<Vec<_>>()
                .join("/"),
        )
    }

    fn object_url(&self, public: bool, path: &str) -> Url {
        let scope = public.then_some("public");

        self.client.segment_url(
            "storage",
            ["object"]
                .into_iter()
                .chain(scope)
                .chain([self.bucket.as_str()])
                .chain(path.split('/')),
        )
    }
}

fn percent_decode(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let high = char::from(bytes[i + 1]).to_digit(16);
            let low = char::from(bytes[i + 2]).to_digit(16);

            if let (Some(high), Some(low)) = (high, low)
                && let Ok(byte) = u8::try_from((high << 4) | low)
            {
                out.push(byte);
                i += 3;
                continue;
            }
        }

        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[async_trait]
impl ImageStore for StorageClient {
    async fn upload(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ProviderError> {
        debug!(bucket = %self.bucket, path, size = bytes.len(), "uploading object");

        let request = self
            .client
            .request(Method::POST, self.object_url(false, path).as_str())
            .header(CONTENT_TYPE, content_type)
            .body(bytes);

        self.client.send(request, Access::User).await?;

        info!(bucket = %self.bucket, path, "uploaded object");

        Ok(self.public_url(path))
    }

    async fn remove(&self, urls: Vec<String>) -> Result<(), ProviderError> {
        let prefixes: Vec<String> = urls
            .iter()
            .filter_map(|url| self.path_from_url(url))
            .collect();

        if prefixes.is_empty() {
            return Ok(());
        }

        debug!(bucket = %self.bucket, ?prefixes, "removing objects");

        let request = self
            .client
            .request(
                Method::DELETE,
                &self.client.url("storage", &format!("object/{}", self.bucket)),
            )
            .json(&json!({ "prefixes": prefixes }));

        self.client.send(request, Access::User).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload an object and return its public URL.
    async fn upload(
        &self,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ProviderError>;

    /// Remove the objects behind the given public URLs. URLs outside the bucket are ignored.
    async fn remove(&self, urls: Vec<String>) -> Result<(), ProviderError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_bytes, body_json, header, method, path},
    };

    use super::*;
    use crate::{auth::session::tests::session, provider::tests::client};

    #[test]
    fn public_urls_round_trip_to_paths() {
        let storage = StorageClient::images(client("https://project.example.co"));
        let url = storage.public_url("public/tee.png");

        assert_eq!(
            url,
            "https://project.example.co/storage/v1/object/public/images/public/tee.png"
        );
        assert_eq!(
            storage.path_from_url(&url).as_deref(),
            Some("public/tee.png")
        );
        assert_eq!(
            storage.path_from_url("https://cdn.example.com/tee.png"),
            None
        );
    }

    #[test]
    fn reserved_characters_in_names_stay_in_the_path() {
        let storage = StorageClient::images(client("https://project.example.co"));
        let url = storage.public_url("public/tee?size=xl#1.png");

        assert_eq!(
            url,
            "https://project.example.co/storage/v1/object/public/images/public/tee%3Fsize=xl%231.png"
        );
        assert_eq!(
            storage.path_from_url(&url).as_deref(),
            Some("public/tee?size=xl#1.png")
        );
    }

    #[tokio::test]
    async fn upload_posts_to_the_encoded_object_path() -> TestResult {
        let server = MockServer::start().await;
        let client = client(&server.uri());
        client.sessions().set(session("admin-token")).await;

        let storage = StorageClient::images(client);

        Mock::given(method("POST"))
            .and(path("/storage/v1/object/images/public/summer%20tee%3F.png"))
            .and(header("Content-Type", "image/png"))
            .and(body_bytes(vec![1_u8, 2, 3]))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "images/x" })))
            .expect(1)
            .mount(&server)
            .await;

        let url = storage
            .upload("public/summer tee?.png", "image/png", vec![1, 2, 3])
            .await?;

        assert_eq!(
            storage.path_from_url(&url).as_deref(),
            Some("public/summer tee?.png")
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_sends_object_paths() -> TestResult {
        let server = MockServer::start().await;
        let client = client(&server.uri());
        client.sessions().set(session("admin-token")).await;

        let storage = StorageClient::images(client);
        let url = storage.public_url("public/tee.png");

        Mock::given(method("DELETE"))
            .and(path("/storage/v1/object/images"))
            .and(header("Authorization", "Bearer admin-token"))
            .and(body_json(json!({ "prefixes": ["public/tee.png"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        storage.remove(vec![url]).await?;

        Ok(())
    }

    #[tokio::test]
    async fn remove_without_session_stays_local() -> TestResult {
        let server = MockServer::start().await;
        let storage = StorageClient::images(client(&server.uri()));
        let url = storage.public_url("public/tee.png");

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = storage.remove(vec![url]).await;

        assert!(
            matches!(result, Err(ProviderError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_of_foreign_urls_is_a_no_op() -> TestResult {
        let storage = StorageClient::images(client("https://project.example.co"));

        storage
            .remove(vec!["https://cdn.example.com/tee.png".to_string()])
            .await?;

        Ok(())
    }
}
