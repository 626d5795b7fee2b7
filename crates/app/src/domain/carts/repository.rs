//! Carts Repository

use storefront::cart::CartLineId;

use crate::{
    auth::UserUuid,
    domain::{
        carts::records::{CART_COLUMNS, CartLineRecord, NewCartLineRecord},
        products::records::CreatedRecord,
    },
    provider::{Access, ProviderClient, ProviderError, Query},
};

const CARTS: &str = "carts";

#[derive(Debug, Clone)]
pub(crate) struct ProviderCartsRepository {
    client: ProviderClient,
}

impl ProviderCartsRepository {
    #[must_use]
    pub(crate) fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    pub(crate) async fn get_cart_lines(
        &self,
        user: UserUuid,
    ) -> Result<Vec<CartLineRecord>, ProviderError> {
        let query = Query::new()
            .select(CART_COLUMNS)
            .eq("user_id", user)
            .order("id", true);

        self.client.select(Access::User, CARTS, &query).await
    }

    pub(crate) async fn create_cart_line(
        &self,
        line: &NewCartLineRecord,
    ) -> Result<i64, ProviderError> {
        let created: Vec<CreatedRecord> = self
            .client
            .insert(Access::User, CARTS, std::slice::from_ref(line))
            .await?;

        created.first().map(|record| record.id).ok_or_else(|| {
            ProviderError::UnexpectedResponse("cart insert returned no row".into())
        })
    }

    pub(crate) async fn delete_cart_lines(
        &self,
        user: UserUuid,
        lines: &[CartLineId],
    ) -> Result<(), ProviderError> {
        let query = Query::new()
            .eq("user_id", user)
            .in_list("id", lines.iter().copied());

        self.client.delete(Access::User, CARTS, &query).await
    }
}
