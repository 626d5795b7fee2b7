//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, ProviderAuthService},
    controllers::{
        AdminController, AuthController, CartController, MainController, OrderHistoryController,
        ProfileController, StoreController,
    },
    domain::{
        carts::{CartsService, ProviderCartsService},
        orders::{OrdersService, ProviderOrdersService},
        products::{ProductsService, ProviderProductsService},
        profiles::{ProfilesService, ProviderProfilesService},
    },
    provider::{ProviderClient, ProviderConfig, ProviderError, StorageClient},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build provider client")]
    Provider(#[source] ProviderError),
}

/// One provider client shared by every service.
#[derive(Clone)]
pub struct AppContext {
    pub client: ProviderClient,
    pub auth: Arc<dyn AuthService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub products: Arc<dyn ProductsService>,
    pub profiles: Arc<dyn ProfilesService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from provider settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: ProviderConfig) -> Result<Self, AppInitError> {
        let client = ProviderClient::new(config).map_err(AppInitError::Provider)?;
        let images = Arc::new(StorageClient::images(client.clone()));

        Ok(Self {
            auth: Arc::new(ProviderAuthService::new(client.clone())),
            carts: Arc::new(ProviderCartsService::new(client.clone())),
            orders: Arc::new(ProviderOrdersService::new(client.clone())),
            products: Arc::new(ProviderProductsService::new(client.clone(), images)),
            profiles: Arc::new(ProviderProfilesService::new(client.clone())),
            client,
        })
    }

    #[must_use]
    pub fn auth_controller(&self) -> AuthController {
        AuthController::new(Arc::clone(&self.auth))
    }

    #[must_use]
    pub fn cart_controller(&self) -> CartController {
        CartController::new(Arc::clone(&self.carts), Arc::clone(&self.orders))
    }

    #[must_use]
    pub fn main_controller(&self) -> MainController {
        MainController::new(Arc::clone(&self.products))
    }

    #[must_use]
    pub fn store_controller(&self) -> StoreController {
        StoreController::new(Arc::clone(&self.products))
    }

    #[must_use]
    pub fn order_history_controller(&self) -> OrderHistoryController {
        OrderHistoryController::new(Arc::clone(&self.orders))
    }

    #[must_use]
    pub fn profile_controller(&self) -> ProfileController {
        ProfileController::new(Arc::clone(&self.profiles), Arc::clone(&self.auth))
    }

    #[must_use]
    pub fn admin_controller(&self) -> AdminController {
        AdminController::new(Arc::clone(&self.products))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn services_share_one_session_store() -> TestResult {
        let context = AppContext::new(ProviderConfig {
            url: "http://localhost:54321".to_string(),
            anon_key: "anon".to_string(),
            image_bucket: "images".to_string(),
            timeout: Duration::from_secs(5),
        })?;

        assert!(
            !context.client.sessions().is_signed_in().await,
            "fresh context is signed out"
        );

        let result = context.carts.get_cart().await;

        assert!(
            matches!(result, Err(crate::domain::carts::CartsServiceError::Unauthorized)),
            "expected Unauthorized, got {result:?}"
        );

        Ok(())
    }
}
