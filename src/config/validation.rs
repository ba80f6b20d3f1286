use crate::config::types::HarvestConfig;
use crate::ConfigError;
use std::time::Duration;

/// Validates the entire configuration
pub fn validate(config: &HarvestConfig) -> Result<(), ConfigError> {
    validate_workers(config.worker_count)?;
    validate_timeout(config.task_timeout)?;
    validate_paths(config)?;
    Ok(())
}

/// Validates the worker pool size
fn validate_workers(worker_count: usize) -> Result<(), ConfigError> {
    if worker_count < 1 || worker_count > 128 {
        return Err(ConfigError::Validation(format!(
            "worker count must be between 1 and 128, got {}",
            worker_count
        )));
    }
    Ok(())
}

/// Validates the per-task timeout
fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
    if timeout < Duration::from_secs(1) {
        return Err(ConfigError::Validation(format!(
            "task timeout must be at least 1s, got {:?}",
            timeout
        )));
    }
    Ok(())
}

/// Validates the save directory and name prefix
fn validate_paths(config: &HarvestConfig) -> Result<(), ConfigError> {
    if config.save_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "save directory cannot be empty".to_string(),
        ));
    }

    if let Some(prefix) = &config.name_prefix {
        if prefix.is_empty() {
            return Err(ConfigError::Validation(
                "name prefix cannot be empty when given".to_string(),
            ));
        }
        if prefix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "name prefix must not contain path separators, got '{}'",
                prefix
            )));
        }
    }

    Ok(())
}
