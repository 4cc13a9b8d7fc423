//! OdinCode Agents Module
//!
//! The agents module provides specialized AI agents for different coding tasks
//! within the OdinCode system. These agents leverage the core engine and LTMC
//! system to provide intelligent code assistance.

pub mod code_generator;
pub mod code_understanding;
pub mod coordinator;
pub mod documenter;
pub mod llm_integration;
pub mod ltmc_integration;
pub mod models;
pub mod refactorer;
pub mod test_generator;
pub mod vulnerability_scanner;

pub use code_generator::*;
pub use code_understanding::*;
pub use coordinator::*;
pub use documenter::*;
pub use llm_integration::*;
pub use ltmc_integration::*;
pub use models::*;
pub use refactorer::*;
pub use test_generator::*;
pub use vulnerability_scanner::*;
