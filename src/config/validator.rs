use crate::config::Config;
use crate::error::{Result, ValidationError, ZeitgeistError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_storage(config, &mut errors);
        Self::validate_sampling(config, &mut errors);
        Self::validate_clustering(config, &mut errors);
        Self::validate_mock(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ZeitgeistError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_storage(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.storage.data_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "storage.data_dir",
                "Data directory path cannot be empty",
            ));
        }
        if config.storage.cache_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "storage.cache_dir",
                "Cache directory path cannot be empty",
            ));
        }
    }

    fn validate_sampling(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.sampling.sample_size == 0 {
            errors.push(ValidationError::new(
                "sampling.sample_size",
                "Sample size must be greater than 0",
            ));
        }
    }

    fn validate_clustering(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.clustering.num_clusters == 0 {
            errors.push(ValidationError::new(
                "clustering.num_clusters",
                "Cluster count must be greater than 0",
            ));
        }

        if config.clustering.sentiment_clusters == 0 {
            errors.push(ValidationError::new(
                "clustering.sentiment_clusters",
                "Sentiment cluster count must be greater than 0",
            ));
        }

        let threshold = config.clustering.distance_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            errors.push(ValidationError::new(
                "clustering.distance_threshold",
                format!("Distance threshold must be in (0, 1), got {}", threshold),
            ));
        }
    }

    fn validate_mock(config: &Config, errors: &mut Vec<ValidationError>) {
        // Mock output is derived entirely from the seed.
        if config.mock.enabled && config.sampling.seed.is_none() {
            errors.push(ValidationError::new(
                "mock.enabled",
                "Mock runs require sampling.seed to be set",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_sample_size() {
        let mut config = Config::default();
        config.sampling.sample_size = 0;
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn rejects_threshold_outside_unit_interval() {
        let mut config = Config::default();
        config.clustering.distance_threshold = 1.0;
        assert!(ConfigValidator::validate(&config).is_err());

        config.clustering.distance_threshold = 0.0;
        assert!(ConfigValidator::validate(&config).is_err());

        config.clustering.distance_threshold = 0.5;
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn rejects_mock_without_seed() {
        let mut config = Config::default();
        config.mock.enabled = true;
        config.sampling.seed = None;
        assert!(ConfigValidator::validate(&config).is_err());

        config.sampling.seed = Some(42);
        assert!(ConfigValidator::validate(&config).is_ok());
    }
}
