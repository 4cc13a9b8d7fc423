//! Model Importer
//!
//! Handles importing trained models from various formats and sources.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::ml_integration::metadata::{ModelMetadata, ModelType};
use crate::ml_integration::models::TrainedModel;

/// Supported import formats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ImportFormat {
    /// JSON format for model metadata and parameters
    Json,
    /// Binary format for large models
    Binary,
    /// ONNX format for model interoperability
    Onnx,
    /// Pickle format (Python compatibility)
    Pickle,
    /// Custom OdinCode format
    Odin,
}

/// Import configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Import format
    pub format: ImportFormat,
    /// Source path or URL
    pub source: String,
    /// Whether to validate model after import
    pub validate: bool,
    /// Whether to overwrite existing model
    pub overwrite: bool,
    /// Additional import options
    pub options: HashMap<String, String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            format: ImportFormat::Odin,
            source: String::new(),
            validate: true,
            overwrite: false,
            options: HashMap::new(),
        }
    }
}

/// Model import result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    /// Import success status
    pub success: bool,
    /// Imported model metadata
    pub metadata: Option<ModelMetadata>,
    /// Import warnings
    pub warnings: Vec<String>,
    /// Import errors
    pub errors: Vec<String>,
    /// Import statistics
    pub stats: ImportStats,
}

/// Import statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportStats {
    /// Model size in bytes
    pub model_size: u64,
    /// Number of parameters
    pub parameter_count: usize,
    /// Import duration in milliseconds
    pub import_duration_ms: u64,
    /// Validation duration in milliseconds
    pub validation_duration_ms: u64,
}

/// Model Importer
///
/// Handles importing trained models from various sources and formats.
pub struct ModelImporter {
    /// Supported formats
    supported_formats: Vec<ImportFormat>,
    /// Import cache
    import_cache: HashMap<String, ImportResult>,
}

impl ModelImporter {
    /// Create a new model importer
    pub fn new() -> Self {
        Self {
            supported_formats: vec![
                ImportFormat::Json,
                ImportFormat::Binary,
                ImportFormat::Onnx,
                ImportFormat::Odin,
            ],
            import_cache: HashMap::new(),
        }
    }

    /// Import a model from the given configuration
    pub async fn import_model(&mut self, config: ImportConfig) -> Result<ImportResult> {
        let start_time = std::time::Instant::now();

        info!("Importing model from: {}", config.source);
        debug!("Import format: {:?}", config.format);

        // Check if model already exists in cache
        if let Some(cached_result) = self.import_cache.get(&config.source) {
            if !config.overwrite {
                info!("Model found in cache: {}", config.source);
                return Ok(cached_result.clone());
            }
        }

        let mut result = ImportResult {
            success: false,
            metadata: None,
            warnings: Vec::new(),
            errors: Vec::new(),
            stats: ImportStats {
                model_size: 0,
                parameter_count: 0,
                import_duration_ms: 0,
                validation_duration_ms: 0,
            },
        };

        // Import based on format
        let import_result = match config.format {
            ImportFormat::Json => self.import_json(&config).await,
            ImportFormat::Binary => self.import_binary(&config).await,
            ImportFormat::Onnx => self.import_onnx(&config).await,
            ImportFormat::Pickle => self.import_pickle(&config).await,
            ImportFormat::Odin => self.import_odin(&config).await,
        };

        match import_result {
            Ok((metadata, model_size, parameter_count)) => {
                result.success = true;
                result.metadata = Some(metadata);
                result.stats.model_size = model_size;
                result.stats.parameter_count = parameter_count;

                info!("Successfully imported model from: {}", config.source);
            }
            Err(e) => {
                result.errors.push(e.to_string());
                warn!("Failed to import model from {}: {}", config.source, e);
            }
        }

        // Validate if requested
        if config.validate && result.success {
            let validation_start = std::time::Instant::now();
            if let Err(e) = self.validate_imported_model(&config).await {
                result.warnings.push(format!("Validation warning: {}", e));
            }
            result.stats.validation_duration_ms = validation_start.elapsed().as_millis() as u64;
        }

        result.stats.import_duration_ms = start_time.elapsed().as_millis() as u64;

        // Cache the result
        self.import_cache
            .insert(config.source.clone(), result.clone());

        Ok(result)
    }

    /// Import model from JSON format
    async fn import_json(&self, config: &ImportConfig) -> Result<(ModelMetadata, u64, usize)> {
        debug!("Importing JSON model from: {}", config.source);

        let path = Path::new(&config.source);
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON file: {}", config.source))?;

        let metadata: ModelMetadata = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON metadata: {}", config.source))?;

        let model_size = content.len() as u64;
        let parameter_count = self.estimate_parameter_count(&metadata)?;

        Ok((metadata, model_size, parameter_count))
    }

    /// Import model from binary format
    async fn import_binary(&self, config: &ImportConfig) -> Result<(ModelMetadata, u64, usize)> {
        debug!("Importing binary model from: {}", config.source);

        let path = Path::new(&config.source);
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read binary file: {}", config.source))?;

        // For binary format, assume metadata is embedded or stored separately
        // This is a simplified implementation
        let metadata = ModelMetadata {
            id: uuid::Uuid::new_v4(),
            name: format!("Imported Model from {}", config.source),
            version: "1.0.0".to_string(),
            model_type: ModelType::LinearRegression,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            training_data_size: 1000, // Placeholder
            performance_metrics: Default::default(),
            hyperparameters: HashMap::new(),
            is_active: true,
            description: format!("Imported from binary: {}", config.source),
        };

        let model_size = bytes.len() as u64;
        let parameter_count = bytes.len() / 4; // Rough estimate

        Ok((metadata, model_size, parameter_count))
    }

    /// Import model from ONNX format
    async fn import_onnx(&self, config: &ImportConfig) -> Result<(ModelMetadata, u64, usize)> {
        debug!("Importing ONNX model from: {}", config.source);

        // ONNX import would require additional dependencies
        // This is a placeholder implementation
        anyhow::bail!("ONNX import not yet implemented");
    }

    /// Import model from Pickle format
    async fn import_pickle(&self, config: &ImportConfig) -> Result<(ModelMetadata, u64, usize)> {
        debug!("Importing Pickle model from: {}", config.source);

        // Pickle import would require Python integration
        // This is a placeholder implementation
        anyhow::bail!("Pickle import not yet implemented");
    }

    /// Import model from OdinCode format
    async fn import_odin(&self, config: &ImportConfig) -> Result<(ModelMetadata, u64, usize)> {
        debug!("Importing OdinCode model from: {}", config.source);

        let path = Path::new(&config.source);

        // OdinCode format typically includes metadata.json and model.bin
        let metadata_path = path.join("metadata.json");
        let model_path = path.join("model.bin");

        let metadata_content = std::fs::read_to_string(&metadata_path)
            .with_context(|| format!("Failed to read metadata file: {:?}", metadata_path))?;

        let metadata: ModelMetadata = serde_json::from_str(&metadata_content)
            .with_context(|| format!("Failed to parse metadata: {:?}", metadata_path))?;

        let model_bytes = std::fs::read(&model_path)
            .with_context(|| format!("Failed to read model file: {:?}", model_path))?;

        let model_size = model_bytes.len() as u64;
        let parameter_count = self.estimate_parameter_count(&metadata)?;

        Ok((metadata, model_size, parameter_count))
    }

    /// Validate imported model
    async fn validate_imported_model(&self, config: &ImportConfig) -> Result<()> {
        debug!("Validating imported model: {}", config.source);

        // Basic validation - check if file exists and is readable
        let path = Path::new(&config.source);
        if !path.exists() {
            anyhow::bail!("Model file does not exist: {}", config.source);
        }

        if !path.is_file() {
            anyhow::bail!("Model path is not a file: {}", config.source);
        }

        // Additional validation would depend on the model type
        // This is a basic implementation

        Ok(())
    }

    /// Estimate parameter count from metadata
    fn estimate_parameter_count(&self, metadata: &ModelMetadata) -> Result<usize> {
        // This is a simplified estimation
        // In practice, this would depend on the model type and architecture
        match metadata.model_type {
            ModelType::LinearRegression => Ok(metadata.hyperparameters.len()),
            ModelType::KMeans => Ok(metadata.hyperparameters.len()),
            ModelType::SVM => Ok(metadata.hyperparameters.len()),
            _ => Ok(1000), // Default estimate
        }
    }

    /// Get supported import formats
    pub fn supported_formats(&self) -> &[ImportFormat] {
        &self.supported_formats
    }

    /// Clear import cache
    pub fn clear_cache(&mut self) {
        self.import_cache.clear();
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> (usize, u64) {
        let cache_size = self.import_cache.len();
        let total_size: u64 = self.import_cache.values().map(|r| r.stats.model_size).sum();
        (cache_size, total_size)
    }
}

impl Default for ModelImporter {
    fn default() -> Self {
        Self::new()
    }
}
