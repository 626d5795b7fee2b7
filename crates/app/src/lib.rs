//! Storefront application layer: provider client, domain services and view state controllers.

pub mod auth;
pub mod context;
pub mod controllers;
pub mod domain;
pub mod notices;
pub mod provider;
