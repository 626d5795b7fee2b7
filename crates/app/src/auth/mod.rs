//! Authentication

mod errors;
pub mod gotrue;
mod models;
pub mod session;
mod service;

pub use errors::*;
pub use gotrue::GoTrueClient;
pub use models::*;
pub use service::*;
pub use session::{SecretToken, Session, SessionStore};
