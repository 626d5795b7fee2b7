//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use storefront::cart::{CartLine, CartLineId};
use tracing::{debug, info};

use crate::{
    domain::carts::{
        errors::CartsServiceError,
        models::NewCartLine,
        records::NewCartLineRecord,
        repository::ProviderCartsRepository,
    },
    provider::ProviderClient,
};

#[derive(Debug, Clone)]
pub struct ProviderCartsService {
    client: ProviderClient,
    repository: ProviderCartsRepository,
}

impl ProviderCartsService {
    #[must_use]
    pub fn new(client: ProviderClient) -> Self {
        Self {
            repository: ProviderCartsRepository::new(client.clone()),
            client,
        }
    }
}

#[async_trait]
impl CartsService for ProviderCartsService {
    async fn get_cart(&self) -> Result<Vec<CartLine>, CartsServiceError> {
        let user = self.client.current_user().await?;

        let records = self.repository.get_cart_lines(user.id).await?;

        debug!(user = %user.id, lines = records.len(), "loaded cart");

        records
            .into_iter()
            .map(|record| CartLine::try_from(record).map_err(CartsServiceError::from))
            .collect()
    }

    async fn add_line(&self, line: NewCartLine) -> Result<CartLineId, CartsServiceError> {
        let user = self.client.current_user().await?;

        let id = self
            .repository
            .create_cart_line(&NewCartLineRecord {
                user_id: user.id,
                product_id: line.product.get(),
                size_id: line.size.get(),
                color_id: line.color.get(),
                stock_id: line.stock.get(),
                count: line.quantity,
            })
            .await?;

        info!(user = %user.id, line = id, "added cart line");

        Ok(CartLineId::new(id))
    }

    async fn delete_lines(&self, lines: Vec<CartLineId>) -> Result<(), CartsServiceError> {
        if lines.is_empty() {
            return Ok(());
        }

        let user = self.client.current_user().await?;

        self.repository.delete_cart_lines(user.id, &lines).await?;

        info!(user = %user.id, lines = lines.len(), "deleted cart lines");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Cart lines of the signed-in user, with product, variant and stock details.
    async fn get_cart(&self) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Add a product variant to the signed-in user's cart.
    async fn add_line(&self, line: NewCartLine) -> Result<CartLineId, CartsServiceError>;

    /// Remove lines from the signed-in user's cart.
    async fn delete_lines(&self, lines: Vec<CartLineId>) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use storefront::products::{ColorId, ProductId, SizeId, StockId};
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path, query_param},
    };

    use super::*;
    use crate::{auth::session::tests::session, provider::tests::client};

    #[tokio::test]
    async fn get_cart_requires_a_session() {
        let server = MockServer::start().await;
        let service = ProviderCartsService::new(client(&server.uri()));

        let result = service.get_cart().await;

        assert!(
            matches!(result, Err(CartsServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_cart_filters_by_signed_in_user() -> TestResult {
        let server = MockServer::start().await;
        let client = client(&server.uri());
        let session = session("user-token");
        let user = session.user.id;

        client.sessions().set(session).await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/carts"))
            .and(header("Authorization", "Bearer user-token"))
            .and(query_param("user_id", format!("eq.{user}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 9,
                "count": 3,
                "products": { "id": 1, "name": "Tee", "price": 12000, "files": [] },
                "sizes": { "id": 2, "size": "L" },
                "colors": { "id": 3, "color": "navy" },
                "stocks": { "id": 4, "stock": 10 }
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let lines = ProviderCartsService::new(client).get_cart().await?;

        assert_eq!(lines.len(), 1);

        let line = lines.first().ok_or("missing line")?;
        assert_eq!(line.id, CartLineId::new(9));
        assert_eq!(line.quantity, 3);
        assert_eq!(line.color.label, "navy");

        Ok(())
    }

    #[tokio::test]
    async fn add_line_inserts_row_for_user() -> TestResult {
        let server = MockServer::start().await;
        let client = client(&server.uri());
        let session = session("user-token");
        let user = session.user.id;

        client.sessions().set(session).await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/carts"))
            .and(body_partial_json(json!([{
                "user_id": user,
                "product_id": 1,
                "size_id": 2,
                "color_id": 3,
                "stock_id": 4,
                "count": 2
            }])))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{ "id": 77 }])))
            .expect(1)
            .mount(&server)
            .await;

        let id = ProviderCartsService::new(client)
            .add_line(NewCartLine {
                product: ProductId::new(1),
                size: SizeId::new(2),
                color: ColorId::new(3),
                stock: StockId::new(4),
                quantity: 2,
            })
            .await?;

        assert_eq!(id, CartLineId::new(77));

        Ok(())
    }

    #[tokio::test]
    async fn delete_lines_targets_listed_ids() -> TestResult {
        let server = MockServer::start().await;
        let client = client(&server.uri());

        client.sessions().set(session("user-token")).await;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/carts"))
            .and(query_param("id", "in.(4,5)"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        ProviderCartsService::new(client)
            .delete_lines(vec![CartLineId::new(4), CartLineId::new(5)])
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn deleting_nothing_sends_nothing() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        ProviderCartsService::new(client(&server.uri()))
            .delete_lines(Vec::new())
            .await?;

        Ok(())
    }
}
