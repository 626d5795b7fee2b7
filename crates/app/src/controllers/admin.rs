//! Admin Product Controller

use std::sync::Arc;

use storefront::{
    forms::{ProductEditForm, ProductForm},
    products::ProductId,
};
use tracing::info;

use crate::{
    controllers::{catalog::into_notice, form_notice},
    domain::products::{ProductDetail, ProductsService},
    notices::{Notice, Outcome},
};

/// Product management screen: create form, product list and the product being edited.
pub struct AdminController {
    products: Arc<dyn ProductsService>,
    form: ProductForm,
    list: Vec<ProductDetail>,
    editing: Option<ProductEditForm>,
}

impl std::fmt::Debug for AdminController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminController")
            .field("form", &self.form)
            .field("products", &self.list.len())
            .field("editing", &self.editing)
            .finish_non_exhaustive()
    }
}

impl AdminController {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>) -> Self {
        Self {
            products,
            form: ProductForm::default(),
            list: Vec::new(),
            editing: None,
        }
    }

    #[must_use]
    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    #[must_use]
    pub fn products(&self) -> &[ProductDetail] {
        &self.list
    }

    #[must_use]
    pub fn editing(&self) -> Option<&ProductEditForm> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut ProductEditForm> {
        self.editing.as_mut()
    }

    /// Validate the create form, upload its image and create the product.
    pub async fn create(&mut self) -> Outcome {
        let submission = match self.form.validate() {
            Ok(submission) => submission,
            Err(error) => return Outcome::notice(form_notice(&error)),
        };

        match self.products.create_product(submission).await {
            Ok(product) => {
                info!(%product, "product registered");

                self.form = ProductForm::default();

                Outcome::notice(Notice::success("Product registered"))
            }
            Err(error) => Outcome::notice(into_notice(error)),
        }
    }

    /// Every product, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error notice when the request fails.
    pub async fn load_list(&mut self) -> Result<(), Notice> {
        self.list = self.products.list_products().await.map_err(into_notice)?;

        Ok(())
    }

    /// Load a product into the edit form.
    ///
    /// # Errors
    ///
    /// Returns an error notice when the product cannot be fetched.
    pub async fn begin_edit(&mut self, product: ProductId) -> Result<(), Notice> {
        let detail = self
            .products
            .get_product(product)
            .await
            .map_err(into_notice)?;

        self.editing = Some(detail.edit_form());

        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Submit the edit form and refresh the list.
    pub async fn submit_edit(&mut self) -> Outcome {
        let Some(form) = &self.editing else {
            return Outcome::notice(Notice::warning("Choose a product to edit"));
        };

        let edit = match form.validate() {
            Ok(edit) => edit,
            Err(error) => return Outcome::notice(form_notice(&error)),
        };

        let product = edit.product;

        if let Err(error) = self.products.update_product(edit).await {
            return Outcome::notice(into_notice(error));
        }

        info!(%product, "product updated");

        self.editing = None;

        self.refreshed(Notice::success("Product updated")).await
    }

    /// Delete a product with its images and options, then refresh the list.
    pub async fn delete(&mut self, product: ProductId) -> Outcome {
        if let Err(error) = self.products.delete_product(product).await {
            return Outcome::notice(into_notice(error));
        }

        info!(%product, "product deleted");

        if self
            .editing
            .as_ref()
            .is_some_and(|form| form.product == product)
        {
            self.editing = None;
        }

        self.refreshed(Notice::success("Product deleted")).await
    }

    async fn refreshed(&mut self, notice: Notice) -> Outcome {
        match self.load_list().await {
            Ok(()) => Outcome::notice(notice),
            Err(failed) => Outcome::notice(failed),
        }
    }
}
