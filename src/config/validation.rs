use crate::config::types::{ContentConfig, OutputConfig, ScopeConfig, ScraperConfig};
use crate::ConfigError;
use regex::Regex;

/// Validates the entire configuration
pub fn validate(config: &ScraperConfig) -> Result<(), ConfigError> {
    validate_scope_config(&config.scope)?;
    validate_content_config(&config.content)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scope configuration
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    Regex::new(&config.allowed_domain_pattern).map_err(|e| {
        ConfigError::InvalidPattern(format!(
            "allowed_domain_pattern '{}' does not compile: {}",
            config.allowed_domain_pattern, e
        ))
    })?;

    for ext in &config.excluded_extensions {
        validate_extension(ext)?;
    }

    validate_domain_string(&config.subdomain_root)?;

    Ok(())
}

/// Validates content configuration
fn validate_content_config(config: &ContentConfig) -> Result<(), ConfigError> {
    // min_words_threshold = 0 disables the low-information check, which is allowed

    if config.trap_threshold < 1 {
        return Err(ConfigError::Validation(format!(
            "trap_threshold must be >= 1, got {}",
            config.trap_threshold
        )));
    }

    if config.top_words_count < 1 {
        return Err(ConfigError::Validation(format!(
            "top_words_count must be >= 1, got {}",
            config.top_words_count
        )));
    }

    if let Some(word) = config.stop_words.iter().find(|w| w.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "stop_words cannot contain blank entries, got '{}'",
            word
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_dir.is_empty() {
        return Err(ConfigError::Validation(
            "report_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates an excluded extension such as ".pdf"
fn validate_extension(ext: &str) -> Result<(), ConfigError> {
    if ext.len() < 2 || !ext.starts_with('.') {
        return Err(ConfigError::Validation(format!(
            "excluded extension '{}' must start with '.' and name an extension",
            ext
        )));
    }

    if ext.chars().any(|c| c.is_uppercase()) {
        return Err(ConfigError::Validation(format!(
            "excluded extension '{}' must be lowercase",
            ext
        )));
    }

    Ok(())
}

/// Validates a domain string such as "ics.uci.edu"
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    // Check for invalid characters
    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    // Check that it doesn't start or end with a dot or hyphen
    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    Ok(())
}
