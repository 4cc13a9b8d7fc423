//! OdinCode API Module
//!
//! The API module provides HTTP endpoints for the OdinCode system,
//! allowing integration with IDEs, editors, and other development tools.

pub mod handlers;
pub mod models;
pub mod server;

pub use handlers::*;
pub use models::*;
pub use server::*;
