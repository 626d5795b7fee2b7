//! Order History Controller

use std::sync::Arc;

use storefront::pagination::{ORDER_HISTORY_PAGE_SIZE, PageCursor, PageRange};
use tracing::error;

use crate::{
    domain::orders::{OrderEntry, OrdersService, OrdersServiceError},
    notices::Notice,
};

/// My Page order history, one order per page.
pub struct OrderHistoryController {
    orders: Arc<dyn OrdersService>,
    cursor: PageCursor,
    entries: Vec<OrderEntry>,
}

impl std::fmt::Debug for OrderHistoryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderHistoryController")
            .field("cursor", &self.cursor)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl OrderHistoryController {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersService>) -> Self {
        Self {
            orders,
            cursor: PageCursor::new(ORDER_HISTORY_PAGE_SIZE),
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[OrderEntry] {
        &self.entries
    }

    #[must_use]
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Count the user's orders and fetch the current page.
    ///
    /// # Errors
    ///
    /// Returns an error notice when either request fails.
    pub async fn load(&mut self) -> Result<(), Notice> {
        let total = self.orders.count_orders().await.map_err(into_notice)?;

        self.cursor.set_total_count(total);
        self.cursor.clamp_to_total();

        self.entries = self.fetch(self.cursor.range()).await?;

        Ok(())
    }

    /// Fetch the one-based page `page_number`, then move to it. A failed fetch leaves both the
    /// cursor and the shown entries on the previous page.
    ///
    /// # Errors
    ///
    /// Returns a warning notice for a page outside the history and an error notice when the
    /// request fails.
    pub async fn change_page(&mut self, page_number: u32) -> Result<(), Notice> {
        let range = self
            .cursor
            .range_of(page_number)
            .map_err(|error| Notice::warning(error.to_string()))?;

        let entries = self.fetch(range).await?;

        self.cursor.seek(range);
        self.entries = entries;

        Ok(())
    }

    async fn fetch(&self, range: PageRange) -> Result<Vec<OrderEntry>, Notice> {
        self.orders.list_orders(range).await.map_err(into_notice)
    }
}

fn into_notice(error: OrdersServiceError) -> Notice {
    match error {
        OrdersServiceError::Unauthorized => Notice::warning("Please log in first"),
        OrdersServiceError::Provider(source) => {
            error!("order history request failed: {source}");

            Notice::error("Could not reach the store, please try again")
        }
        other => {
            error!("failed to load order history: {other}");

            Notice::error("Could not load your orders")
        }
    }
}
