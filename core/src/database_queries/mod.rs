//! Database query interfaces for OdinCode
//!
//! This module provides unified query interfaces for accessing all three databases
//! (Metadata, Graph, RAG) with optimized query planning and execution.
//!
//! ## Architecture
//!
//! The module is organized following smart modularization principles:
//! - **query_types**: Core type definitions for queries and results
//! - **query_interface**: Main interface struct and constructor
//! - **execute_metadata_queries**: Query files and symbols from metadata database
//! - **execute_graph_queries**: Query nodes and relationships from graph database
//! - **execute_rag_queries**: Query code chunks and perform semantic search
//! - **execute_stats**: Collect statistics across all databases
//! - **find_related_entities**: Discover cross-database entity relationships
//! - **convert_types**: String-to-enum conversion helpers
//!
//! ## Example
//!
//! ```rust
//! use odincode_core::database_queries::{DatabaseQueryInterface, QueryParams};
//!
//! let interface = DatabaseQueryInterface::new(db_manager);
//! let params = QueryParams::default();
//! let results = interface.query_files(params).await?;
//! ```

// Public modules
pub mod convert_types;
pub mod query_interface;
pub mod query_types;

// Implementation modules (not directly public, accessed via trait implementations)
mod execute_graph_queries;
mod execute_metadata_queries;
mod execute_rag_queries;
mod execute_stats;
mod find_related_entities;

// Re-export main types for convenience
pub use query_interface::DatabaseQueryInterface;
pub use query_types::{DatabaseStats, QueryParams, QueryResult, SearchQuery};
