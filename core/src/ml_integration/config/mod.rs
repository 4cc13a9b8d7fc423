//! ML integration configuration management

pub mod manager;

pub use manager::{LLMConfig, MLIntegrationConfig, ModelRegistryConfig, PerformanceTrackingConfig};
