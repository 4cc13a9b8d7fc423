//! LTMC Memory Search Bridge Storage
//!
//! This module contains storage-related functionality for the memory search bridge.

use anyhow::Result;
use odincode_databases::DatabaseType;
use tracing::{debug, info};
use uuid::Uuid;

use crate::bridges::memory_search::core::MemorySearchBridge;
use crate::models::LearningPattern;

impl MemorySearchBridge {
    /// Store a learning pattern in all databases atomically
    pub async fn store_pattern_atomically(&self, pattern: LearningPattern) -> Result<Uuid> {
        if !self.initialized {
            return Err(anyhow::anyhow!("MemorySearchBridge not initialized"));
        }

        debug!("Storing pattern atomically: {}", pattern.id);

        // In a real implementation, this would use transactions or other atomic mechanisms
        // to ensure the pattern is stored consistently across all databases

        // Store in SQLite (relational data)
        self.store_pattern_in_sqlite(&pattern).await?;

        // Store in FAISS (vector embeddings)
        self.store_pattern_in_faiss(&pattern).await?;

        // Store in Neo4j (graph relationships)
        self.store_pattern_in_neo4j(&pattern).await?;

        // Store in Redis (fast cache)
        self.store_pattern_in_redis(&pattern).await?;

        debug!("Pattern stored atomically: {}", pattern.id);
        Ok(pattern.id)
    }

    /// Store a pattern in SQLite
    async fn store_pattern_in_sqlite(&self, pattern: &LearningPattern) -> Result<()> {
        debug!("Storing pattern in SQLite: {}", pattern.id);

        // Get SQLite connection ID
        let sqlite_id = {
            let ids = self.connection_ids.read().await;
            *ids.get(&DatabaseType::SQLite)
                .ok_or_else(|| anyhow::anyhow!("SQLite connection not found"))?
        };

        // Get connection details
        let connection = self
            .database_manager
            .get_connection(sqlite_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("SQLite connection not found"))?;

        debug!(
            "Using SQLite connection: {} ({})",
            connection.name, connection.id
        );

        // In a real implementation, this would:
        // 1. Connect to SQLite database
        // 2. Begin transaction
        // 3. Insert pattern data
        // 4. Commit transaction

        // For now, simulate the process
        info!("Pattern {} would be stored in SQLite database", pattern.id);
        Ok(())
    }

    /// Store a pattern in FAISS
    async fn store_pattern_in_faiss(&self, pattern: &LearningPattern) -> Result<()> {
        debug!("Storing pattern in FAISS: {}", pattern.id);

        // Get FAISS connection ID
        let faiss_id = {
            let ids = self.connection_ids.read().await;
            *ids.get(&DatabaseType::FAISS)
                .ok_or_else(|| anyhow::anyhow!("FAISS connection not found"))?
        };

        // Get connection details
        let connection = self
            .database_manager
            .get_connection(faiss_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("FAISS connection not found"))?;

        debug!(
            "Using FAISS connection: {} ({})",
            connection.name, connection.id
        );

        // In a real implementation, this would:
        // 1. Connect to FAISS index
        // 2. Convert pattern content to vector embedding
        // 3. Add vector to FAISS index
        // 4. Save updated index

        // For now, simulate the process
        info!(
            "Pattern {} would be stored in FAISS vector database",
            pattern.id
        );
        Ok(())
    }

    /// Store a pattern in Neo4j
    async fn store_pattern_in_neo4j(&self, pattern: &LearningPattern) -> Result<()> {
        debug!("Storing pattern in Neo4j: {}", pattern.id);

        // Get Neo4j connection ID
        let neo4j_id = {
            let ids = self.connection_ids.read().await;
            *ids.get(&DatabaseType::Neo4j)
                .ok_or_else(|| anyhow::anyhow!("Neo4j connection not found"))?
        };

        // Get connection details
        let connection = self
            .database_manager
            .get_connection(neo4j_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Neo4j connection not found"))?;

        debug!(
            "Using Neo4j connection: {} ({})",
            connection.name, connection.id
        );

        // In a real implementation, this would:
        // 1. Connect to Neo4j database
        // 2. Create nodes and relationships for the pattern
        // 3. Commit transaction

        // For now, simulate the process
        info!(
            "Pattern {} would be stored in Neo4j graph database",
            pattern.id
        );
        Ok(())
    }

    /// Store a pattern in Redis
    async fn store_pattern_in_redis(&self, pattern: &LearningPattern) -> Result<()> {
        debug!("Storing pattern in Redis: {}", pattern.id);

        // Get Redis connection ID
        let redis_id = {
            let ids = self.connection_ids.read().await;
            *ids.get(&DatabaseType::Redis)
                .ok_or_else(|| anyhow::anyhow!("Redis connection not found"))?
        };

        // Get connection details
        let connection = self
            .database_manager
            .get_connection(redis_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Redis connection not found"))?;

        debug!(
            "Using Redis connection: {} ({})",
            connection.name, connection.id
        );

        // In a real implementation, this would:
        // 1. Connect to Redis
        // 2. Store pattern in cache with appropriate TTL
        // 3. Update cache indices

        // For now, simulate the process
        info!("Pattern {} would be stored in Redis cache", pattern.id);
        Ok(())
    }

    /// Get pattern from cache (Redis)
    pub async fn get_pattern_from_cache(&self, id: Uuid) -> Result<Option<LearningPattern>> {
        if !self.initialized {
            return Err(anyhow::anyhow!("MemorySearchBridge not initialized"));
        }

        debug!("Getting pattern from cache: {}", id);

        // Get Redis connection ID
        let redis_id = {
            let ids = self.connection_ids.read().await;
            *ids.get(&DatabaseType::Redis)
                .ok_or_else(|| anyhow::anyhow!("Redis connection not found"))?
        };

        // Get connection details
        let connection = self
            .database_manager
            .get_connection(redis_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Redis connection not found"))?;

        debug!(
            "Using Redis connection for cache lookup: {} ({})",
            connection.name, connection.id
        );

        // In a real implementation, this would:
        // 1. Connect to Redis
        // 2. Look up pattern by ID in cache
        // 3. Return cached pattern if found

        // For now, simulate the process
        info!("Pattern {} would be retrieved from Redis cache", id);

        // Return None as placeholder
        Ok(None)
    }

    /// Update pattern access statistics
    pub async fn update_pattern_access_stats(&self, id: Uuid) -> Result<()> {
        if !self.initialized {
            return Err(anyhow::anyhow!("MemorySearchBridge not initialized"));
        }

        debug!("Updating access statistics for pattern: {}", id);

        // In a real implementation, this would:
        // 1. Update access count and timestamp in all databases
        // 2. Update cache with new statistics

        // For now, simulate the process
        info!("Access statistics would be updated for pattern: {}", id);
        Ok(())
    }
}
