//! Orders Repository

use storefront::pagination::PageRange;

use crate::{
    auth::UserUuid,
    domain::{
        orders::records::{ORDER_COLUMNS, OrderRecord, PLACE_ORDER, PlaceOrderArgs},
        products::records::CreatedRecord,
    },
    provider::{Access, ProviderClient, ProviderError, Query},
};

const BUY_LISTS: &str = "buy_lists";

#[derive(Debug, Clone)]
pub(crate) struct ProviderOrdersRepository {
    client: ProviderClient,
}

impl ProviderOrdersRepository {
    #[must_use]
    pub(crate) fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    pub(crate) async fn count_orders(&self, user: UserUuid) -> Result<u64, ProviderError> {
        self.client
            .count(Access::User, BUY_LISTS, &Query::new().eq("user_id", user))
            .await
    }

    pub(crate) async fn get_orders(
        &self,
        user: UserUuid,
        range: PageRange,
    ) -> Result<Vec<OrderRecord>, ProviderError> {
        let query = Query::new()
            .select(ORDER_COLUMNS)
            .eq("user_id", user)
            .order("created_at", false)
            .range(range);

        self.client.select(Access::User, BUY_LISTS, &query).await
    }

    pub(crate) async fn place_order(
        &self,
        args: &PlaceOrderArgs,
    ) -> Result<Vec<CreatedRecord>, ProviderError> {
        self.client.rpc(Access::User, PLACE_ORDER, args).await
    }
}
