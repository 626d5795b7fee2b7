//! Table and RPC requests against the REST endpoint.

use reqwest::{Method, header::CONTENT_RANGE};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::provider::{Access, ProviderClient, ProviderError, Query};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

impl ProviderClient {
    /// Rows of `table` matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an undecodable body.
    pub async fn select<T: DeserializeOwned>(
        &self,
        access: Access,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, ProviderError> {
        debug!(table, params = ?query.pairs(), "select");

        let request = self
            .request(Method::GET, &self.url("rest", table))
            .query(query.pairs());

        Ok(self.send(request, access).await?.json().await?)
    }

    /// Exactly one row of `table`; zero rows is a 406, classified as not found.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an undecodable body.
    pub async fn select_single<T: DeserializeOwned>(
        &self,
        access: Access,
        table: &str,
        query: &Query,
    ) -> Result<T, ProviderError> {
        debug!(table, params = ?query.pairs(), "select single");

        let request = self
            .request(Method::GET, &self.url("rest", table))
            .header("Accept", SINGLE_OBJECT)
            .query(query.pairs());

        Ok(self.send(request, access).await?.json().await?)
    }

    /// Number of rows of `table` matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a missing count.
    pub async fn count(
        &self,
        access: Access,
        table: &str,
        query: &Query,
    ) -> Result<u64, ProviderError> {
        debug!(table, params = ?query.pairs(), "count");

        let request = self
            .request(Method::HEAD, &self.url("rest", table))
            .header("Prefer", "count=exact")
            .query(query.pairs());

        let response = self.send(request, access).await?;

        let content_range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ProviderError::UnexpectedResponse("count response without Content-Range".into())
            })?;

        parse_total(content_range).ok_or_else(|| {
            ProviderError::UnexpectedResponse(format!("unparseable Content-Range {content_range}"))
        })
    }

    /// Insert `rows` into `table`, returning the created rows.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an undecodable body.
    pub async fn insert<B, T>(
        &self,
        access: Access,
        table: &str,
        rows: &B,
    ) -> Result<Vec<T>, ProviderError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(table, "insert");

        let request = self
            .request(Method::POST, &self.url("rest", table))
            .header("Prefer", "return=representation")
            .json(rows);

        Ok(self.send(request, access).await?.json().await?)
    }

    /// Update the rows of `table` matching `query` with the columns in `changes`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn update<B>(
        &self,
        access: Access,
        table: &str,
        query: &Query,
        changes: &B,
    ) -> Result<(), ProviderError>
    where
        B: Serialize + ?Sized + Sync,
    {
        debug!(table, params = ?query.pairs(), "update");

        let request = self
            .request(Method::PATCH, &self.url("rest", table))
            .header("Prefer", "return=minimal")
            .query(query.pairs())
            .json(changes);

        self.send(request, access).await?;

        Ok(())
    }

    /// Delete the rows of `table` matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn delete(
        &self,
        access: Access,
        table: &str,
        query: &Query,
    ) -> Result<(), ProviderError> {
        debug!(table, params = ?query.pairs(), "delete");

        let request = self
            .request(Method::DELETE, &self.url("rest", table))
            .query(query.pairs());

        self.send(request, access).await?;

        Ok(())
    }

    /// Call the stored procedure `function` with named arguments.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an undecodable body.
    pub async fn rpc<B, T>(
        &self,
        access: Access,
        function: &str,
        arguments: &B,
    ) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(function, "rpc");

        let request = self
            .request(Method::POST, &self.url("rest", &format!("rpc/{function}")))
            .json(arguments);

        Ok(self.send(request, access).await?.json().await?)
    }
}

/// Total from a `Content-Range` value such as `0-7/17` or `*/0`.
fn parse_total(content_range: &str) -> Option<u64> {
    content_range.rsplit_once('/')?.1.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path, query_param},
    };

    use super::*;
    use crate::provider::{
        ProviderErrorKind,
        tests::{ANON_KEY, client},
    };

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
        name: String,
    }

    #[test]
    fn content_range_total_is_parsed() {
        assert_eq!(parse_total("0-7/17"), Some(17));
        assert_eq!(parse_total("*/0"), Some(0));
        assert_eq!(parse_total("0-7/*"), None);
        assert_eq!(parse_total("garbage"), None);
    }

    #[tokio::test]
    async fn select_sends_keys_and_filters() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/products"))
            .and(query_param("select", "id,name"))
            .and(query_param("main_category", "eq.shirts"))
            .and(header("apikey", ANON_KEY))
            .and(header("Authorization", format!("Bearer {ANON_KEY}").as_str()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "name": "Tee" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let rows: Vec<Row> = client(&server.uri())
            .select(
                Access::Public,
                "products",
                &Query::new().select("id, name").eq("main_category", "shirts"),
            )
            .await?;

        assert_eq!(
            rows,
            vec![Row {
                id: 1,
                name: "Tee".to_string()
            }]
        );

        Ok(())
    }

    #[tokio::test]
    async fn count_reads_content_range() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/rest/v1/products"))
            .and(header("Prefer", "count=exact"))
            .respond_with(ResponseTemplate::new(200).insert_header("Content-Range", "0-7/17"))
            .mount(&server)
            .await;

        let total = client(&server.uri())
            .count(Access::Public, "products", &Query::new().select("id"))
            .await?;

        assert_eq!(total, 17);

        Ok(())
    }

    #[tokio::test]
    async fn single_row_miss_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/products"))
            .and(header("Accept", SINGLE_OBJECT))
            .respond_with(ResponseTemplate::new(406).set_body_json(json!({
                "code": "PGRST116",
                "message": "JSON object requested, multiple (or no) rows returned"
            })))
            .mount(&server)
            .await;

        let result = client(&server.uri())
            .select_single::<Row>(Access::Public, "products", &Query::new().eq("id", 99))
            .await;

        assert!(
            matches!(&result, Err(error) if error.kind() == ProviderErrorKind::NotFound),
            "expected not found, got {result:?}"
        );
    }

    #[tokio::test]
    async fn rpc_posts_named_arguments() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/echo"))
            .and(body_json(json!({ "p_value": 3 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(3)))
            .mount(&server)
            .await;

        let value: i64 = client(&server.uri())
            .rpc(Access::Public, "echo", &json!({ "p_value": 3 }))
            .await?;

        assert_eq!(value, 3);

        Ok(())
    }

    #[tokio::test]
    async fn user_access_without_session_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let result = client(&server.uri())
            .delete(Access::User, "carts", &Query::new().in_list("id", [1, 2]))
            .await;

        assert!(
            matches!(result, Err(ProviderError::Unauthenticated)),
            "expected Unauthenticated, got {result:?}"
        );
    }
}
