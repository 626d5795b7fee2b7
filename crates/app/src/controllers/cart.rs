//! Cart Controller

use std::sync::Arc;

use storefront::{
    cart::{Cart, CartError, CartLineId, CartTotals},
    checkout::{CheckoutError, OrderDraft},
    pricing::STORE_CURRENCY,
    quantities::QuantityChange,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        carts::{CartsService, CartsServiceError, NewCartLine},
        orders::{OrdersService, OrdersServiceError},
    },
    notices::{Notice, Outcome, Route},
};

/// Idempotency key reserved for a draft that has not been confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingOrder {
    lines: Vec<CartLineId>,
    key: Uuid,
}

/// Cart screen: loaded lines, local quantities and the checkout selection.
pub struct CartController {
    carts: Arc<dyn CartsService>,
    orders: Arc<dyn OrdersService>,
    cart: Cart,
    pending: Option<PendingOrder>,
}

impl std::fmt::Debug for CartController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartController")
            .field("cart", &self.cart)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl CartController {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsService>, orders: Arc<dyn OrdersService>) -> Self {
        Self {
            carts,
            orders,
            cart: Cart::new(STORE_CURRENCY),
            pending: None,
        }
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Fetch the cart, keeping quantities and marks for lines that are still present.
    ///
    /// # Errors
    ///
    /// Returns an error notice when the provider call fails.
    pub async fn load(&mut self) -> Result<(), Notice> {
        let lines = self.carts.get_cart().await.map_err(into_notice)?;

        self.cart.replace_lines(lines);

        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error notice when the line is not loaded.
    pub fn increment(&mut self, line: CartLineId) -> Result<QuantityChange, Notice> {
        self.cart.increment(line).map_err(cart_notice)
    }

    /// # Errors
    ///
    /// Returns an error notice when the line is not loaded.
    pub fn decrement(&mut self, line: CartLineId) -> Result<QuantityChange, Notice> {
        self.cart.decrement(line).map_err(cart_notice)
    }

    /// Mark or unmark one line for checkout.
    ///
    /// # Errors
    ///
    /// Returns an error notice when the line is not loaded.
    pub fn toggle(&mut self, line: CartLineId, selected: bool) -> Result<(), Notice> {
        self.cart.set_selected(line, selected).map_err(cart_notice)
    }

    pub fn select_all(&mut self, selected: bool) {
        self.cart.select_all(selected);
    }

    /// Per-line subtotals and the grand total.
    ///
    /// # Errors
    ///
    /// Returns an error notice if the total overflows.
    pub fn totals(&self) -> Result<CartTotals, Notice> {
        self.cart.totals().map_err(|source| {
            error!("failed to total cart: {source}");

            Notice::error("Could not compute the cart total")
        })
    }

    /// Put a product variant in the cart, then reload.
    ///
    /// # Errors
    ///
    /// Returns an error notice when either provider call fails.
    pub async fn add_line(&mut self, line: NewCartLine) -> Result<CartLineId, Notice> {
        let id = self.carts.add_line(line).await.map_err(into_notice)?;

        self.load().await?;

        Ok(id)
    }

    /// Delete one line remotely, then reload.
    ///
    /// # Errors
    ///
    /// Returns an error notice when either provider call fails.
    pub async fn delete_line(&mut self, line: CartLineId) -> Result<(), Notice> {
        self.carts
            .delete_lines(vec![line])
            .await
            .map_err(into_notice)?;

        self.load().await
    }

    /// Turn the marked lines into orders.
    ///
    /// Nothing is written when no line is marked. A failed submission keeps its idempotency key,
    /// so retrying the same selection cannot create the orders twice.
    pub async fn place_order(&mut self) -> Outcome {
        let draft = match OrderDraft::from_selection(&self.cart) {
            Ok(draft) => draft,
            Err(CheckoutError::NothingSelected) => {
                return Outcome::notice(Notice::warning("Select at least one item to order"));
            }
        };

        let lines = draft.cart_lines();
        let key = self.idempotency_key(&lines);

        match self.orders.place_order(draft, key).await {
            Ok(placed) => {
                info!(%key, orders = placed.orders.len(), "order placed");

                self.cart.remove_lines(&lines);
                self.cart.clear_selection();
                self.pending = None;

                Outcome::navigate(Route::Payment).with_notice(Notice::success("Order placed"))
            }
            Err(error) => Outcome::notice(order_notice(error)),
        }
    }

    fn idempotency_key(&mut self, lines: &[CartLineId]) -> Uuid {
        if let Some(pending) = &self.pending
            && pending.lines == lines
        {
            return pending.key;
        }

        let key = Uuid::now_v7();

        self.pending = Some(PendingOrder {
            lines: lines.to_vec(),
            key,
        });

        key
    }
}

fn cart_notice(error: CartError) -> Notice {
    warn!("{error}");

    Notice::error("That item is no longer in your cart")
}

pub(crate) fn into_notice(error: CartsServiceError) -> Notice {
    match error {
        CartsServiceError::Unauthorized => Notice::warning("Please log in first"),
        CartsServiceError::NotFound => Notice::error("Cart item not found"),
        CartsServiceError::AlreadyExists => Notice::warning("That item is already in your cart"),
        CartsServiceError::InvalidData | CartsServiceError::InvalidCount(_) => {
            Notice::error("The cart contains invalid data")
        }
        CartsServiceError::Provider(source) => {
            error!("cart request failed: {source}");

            Notice::error("Could not reach the store, please try again")
        }
    }
}

fn order_notice(error: OrdersServiceError) -> Notice {
    match error {
        OrdersServiceError::Unauthorized => Notice::warning("Please log in first"),
        OrdersServiceError::AlreadyPlaced => Notice::warning("This order was already placed"),
        OrdersServiceError::NotFound => {
            Notice::warning("Some items are no longer in your cart, please reload it")
        }
        OrdersServiceError::InvalidData
        | OrdersServiceError::InvalidQuantity(_) => {
            error!("order rejected: {error}");

            Notice::error("The order could not be placed")
        }
        OrdersServiceError::Provider(source) => {
            error!("order request failed: {source}");

            Notice::error("Could not reach the store, please try again")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use storefront::{
        cart::CartLine,
        pricing::won,
        products::{Color, ColorId, ProductId, ProductSummary, Size, SizeId, Stock, StockId},
    };
    use testresult::TestResult;

    use super::*;
    use crate::{
        domain::{
            carts::MockCartsService,
            orders::{MockOrdersService, OrderId, PlacedOrder},
        },
        notices::NoticeLevel,
    };

    fn line(id: i64, price: i64, quantity: u32) -> CartLine {
        CartLine {
            id: CartLineId::new(id),
            product: ProductSummary {
                id: ProductId::new(id),
                name: format!("product {id}"),
                price: won(price),
                image_url: None,
            },
            size: Size {
                id: SizeId::new(id),
                label: "M".to_string(),
            },
            color: Color {
                id: ColorId::new(id),
                label: "black".to_string(),
            },
            stock: Stock {
                id: StockId::new(id),
                available: 10,
            },
            quantity,
        }
    }

    fn carts_returning(lines: Vec<CartLine>) -> MockCartsService {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(move || Ok(lines));

        carts
    }

    async fn loaded(carts: MockCartsService, orders: MockOrdersService) -> TestResult<CartController> {
        let mut controller = CartController::new(Arc::new(carts), Arc::new(orders));

        controller.load().await?;

        Ok(controller)
    }

    #[tokio::test]
    async fn totals_follow_quantity_controls() -> TestResult {
        let carts = carts_returning(vec![line(1, 10_000, 1), line(2, 2_500, 2)]);
        let mut controller = loaded(carts, MockOrdersService::new()).await?;

        controller.increment(CartLineId::new(1))?;
        controller.decrement(CartLineId::new(2))?;

        assert_eq!(controller.totals()?.total, won(22_500));

        Ok(())
    }

    #[tokio::test]
    async fn checkout_without_selection_warns_and_writes_nothing() -> TestResult {
        let carts = carts_returning(vec![line(1, 10_000, 1)]);

        let mut orders = MockOrdersService::new();
        orders.expect_place_order().never();

        let mut controller = loaded(carts, orders).await?;

        let outcome = controller.place_order().await;

        assert_eq!(
            outcome.notice.map(|notice| notice.level),
            Some(NoticeLevel::Warning)
        );
        assert_eq!(outcome.route, None);
        assert_eq!(controller.cart().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_orders_exactly_the_selected_lines() -> TestResult {
        let carts = carts_returning(vec![line(1, 1_000, 1), line(2, 2_000, 2), line(3, 3_000, 3)]);

        let mut orders = MockOrdersService::new();
        orders
            .expect_place_order()
            .once()
            .withf(|draft, _| {
                draft.cart_lines() == vec![CartLineId::new(1), CartLineId::new(3)]
                    && draft.entries().get(1).map(|entry| entry.quantity) == Some(4)
            })
            .return_once(|_, _| {
                Ok(PlacedOrder {
                    orders: vec![OrderId::new(1), OrderId::new(2)],
                })
            });

        let mut controller = loaded(carts, orders).await?;

        controller.toggle(CartLineId::new(1), true)?;
        controller.toggle(CartLineId::new(3), true)?;
        controller.increment(CartLineId::new(3))?;

        let outcome = controller.place_order().await;

        assert_eq!(outcome.route, Some(Route::Payment));
        assert_eq!(controller.cart().len(), 1);
        assert_eq!(controller.cart().selected_count(), 0);
        assert!(
            controller.cart().line(CartLineId::new(2)).is_some(),
            "unselected line must stay"
        );

        Ok(())
    }

    #[tokio::test]
    async fn retry_after_failure_reuses_the_idempotency_key() -> TestResult {
        let carts = carts_returning(vec![line(1, 1_000, 1)]);
        let keys = Arc::new(Mutex::new(Vec::new()));

        let mut orders = MockOrdersService::new();
        let seen = Arc::clone(&keys);
        let mut calls = 0;
        orders
            .expect_place_order()
            .times(2)
            .returning(move |_, key| {
                seen.lock().map(|mut keys| keys.push(key)).ok();
                calls += 1;

                if calls == 1 {
                    Err(OrdersServiceError::InvalidData)
                } else {
                    Ok(PlacedOrder {
                        orders: vec![OrderId::new(5)],
                    })
                }
            });

        let mut controller = loaded(carts, orders).await?;
        controller.select_all(true);

        let failed = controller.place_order().await;
        assert_eq!(
            failed.notice.map(|notice| notice.level),
            Some(NoticeLevel::Error)
        );
        assert_eq!(controller.cart().len(), 1);

        let placed = controller.place_order().await;
        assert_eq!(placed.route, Some(Route::Payment));

        let keys = keys.lock().map_err(|_| "poisoned")?.clone();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.first(), keys.get(1));

        Ok(())
    }

    #[tokio::test]
    async fn delete_line_removes_then_reloads() -> TestResult {
        let mut carts = MockCartsService::new();
        let mut loads = 0;

        carts.expect_get_cart().times(2).returning(move || {
            loads += 1;

            Ok(if loads == 1 {
                vec![line(1, 1_000, 1), line(2, 1_000, 1)]
            } else {
                vec![line(2, 1_000, 1)]
            })
        });

        carts
            .expect_delete_lines()
            .once()
            .withf(|lines| *lines == vec![CartLineId::new(1)])
            .return_once(|_| Ok(()));

        let mut controller = loaded(carts, MockOrdersService::new()).await?;

        controller.delete_line(CartLineId::new(1)).await?;

        assert_eq!(controller.cart().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn add_line_inserts_then_reloads() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_line()
            .once()
            .withf(|line| line.product == ProductId::new(7) && line.quantity == 2)
            .return_once(|_| Ok(CartLineId::new(70)));

        carts
            .expect_get_cart()
            .once()
            .return_once(|| Ok(vec![line(70, 5_000, 2)]));

        let mut controller = CartController::new(Arc::new(carts), Arc::new(MockOrdersService::new()));

        let id = controller
            .add_line(NewCartLine {
                product: ProductId::new(7),
                size: SizeId::new(1),
                color: ColorId::new(1),
                stock: StockId::new(1),
                quantity: 2,
            })
            .await?;

        assert_eq!(id, CartLineId::new(70));
        assert_eq!(controller.totals()?.total, won(10_000));

        Ok(())
    }

    #[tokio::test]
    async fn load_without_session_asks_to_log_in() {
        let mut carts = MockCartsService::new();
        carts
            .expect_get_cart()
            .once()
            .return_once(|| Err(CartsServiceError::Unauthorized));

        let mut controller = CartController::new(Arc::new(carts), Arc::new(MockOrdersService::new()));

        let result = controller.load().await;

        assert!(
            matches!(&result, Err(notice) if notice.level == NoticeLevel::Warning),
            "expected warning notice, got {result:?}"
        );
    }
}
