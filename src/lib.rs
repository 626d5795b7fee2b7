//! Storefront
//!
//! Client-side state for a small clothing storefront: cart aggregation and checkout
//! selection, catalog filtering with "load more" paging, order history paging and the
//! typed forms that feed the remote provider.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod forms;
pub mod ids;
pub mod pagination;
pub mod pricing;
pub mod products;
pub mod quantities;
