//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use storefront::{checkout::OrderDraft, pagination::PageRange};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    domain::orders::{
        errors::OrdersServiceError,
        models::{OrderEntry, OrderId, PlacedOrder},
        records::PlaceOrderArgs,
        repository::ProviderOrdersRepository,
    },
    provider::ProviderClient,
};

#[derive(Debug, Clone)]
pub struct ProviderOrdersService {
    client: ProviderClient,
    repository: ProviderOrdersRepository,
}

impl ProviderOrdersService {
    #[must_use]
    pub fn new(client: ProviderClient) -> Self {
        Self {
            repository: ProviderOrdersRepository::new(client.clone()),
            client,
        }
    }
}

#[async_trait]
impl OrdersService for ProviderOrdersService {
    async fn count_orders(&self) -> Result<u64, OrdersServiceError> {
        let user = self.client.current_user().await?;

        Ok(self.repository.count_orders(user.id).await?)
    }

    async fn list_orders(&self, range: PageRange) -> Result<Vec<OrderEntry>, OrdersServiceError> {
        let user = self.client.current_user().await?;

        let records = self.repository.get_orders(user.id, range).await?;

        debug!(user = %user.id, offset = range.offset, rows = records.len(), "loaded orders");

        records
            .into_iter()
            .map(|record| OrderEntry::try_from(record).map_err(OrdersServiceError::from))
            .collect()
    }

    async fn place_order(
        &self,
        draft: OrderDraft,
        idempotency_key: Uuid,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        let user = self.client.current_user().await?;

        let created = self
            .repository
            .place_order(&PlaceOrderArgs::new(&draft, idempotency_key))
            .await?;

        info!(
            user = %user.id,
            %idempotency_key,
            entries = draft.len(),
            "placed order"
        );

        Ok(PlacedOrder {
            orders: created.iter().map(|record| OrderId::new(record.id)).collect(),
        })
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Number of orders the signed-in user has placed.
    async fn count_orders(&self) -> Result<u64, OrdersServiceError>;

    /// One window of the signed-in user's orders, newest first.
    async fn list_orders(&self, range: PageRange) -> Result<Vec<OrderEntry>, OrdersServiceError>;

    /// Create order rows for `draft` and remove its source cart lines in one provider
    /// transaction. Replaying the same `idempotency_key` returns the rows created the first time.
    async fn place_order(
        &self,
        draft: OrderDraft,
        idempotency_key: Uuid,
    ) -> Result<PlacedOrder, OrdersServiceError>;
}
