pub mod auth;

pub use auth::{require_wallet_role, AuthContext};
