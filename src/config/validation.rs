use crate::config::types::{Config, CrawlerConfig, SelectorConfig, UserAgentConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Upper bound on tasks admitted into a single round
const MAX_ROUND_SIZE: usize = 200;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_base_url(&config.base_url)?;
    validate_storage_path(&config.html_storage_path)?;
    validate_entry_points("kb_entry_point_urls", &config.kb_entry_points)?;
    validate_entry_points("forum_entry_point_urls", &config.forum_entry_points)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_selectors(&config.selectors)?;
    Ok(())
}

/// Validates the base URL used for root-relative resolution
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            base_url
        )));
    }

    // Root-relative paths are appended verbatim, so a trailing slash would double up
    if base_url.ends_with('/') {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must not end with '/'",
            base_url
        )));
    }

    Ok(())
}

fn validate_storage_path(path: &str) -> Result<(), ConfigError> {
    if path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "html_storage_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Entry points may be root-relative, so only emptiness is checked here;
/// the URL validator screens them again when they are scheduled.
fn validate_entry_points(field: &str, urls: &[String]) -> Result<(), ConfigError> {
    if let Some(index) = urls.iter().position(|u| u.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "{}[{}] cannot be empty",
            field, index
        )));
    }
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent < 1 || config.max_concurrent > MAX_ROUND_SIZE {
        return Err(ConfigError::Validation(format!(
            "max_concurrent must be between 1 and {}, got {}",
            MAX_ROUND_SIZE, config.max_concurrent
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent.name cannot be empty".to_string(),
        ));
    }

    if !config
        .name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "user_agent.name must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            config.name
        )));
    }

    Ok(())
}

/// Checks that every selector is non-empty and parses as CSS
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    for (field, selector) in config.entries() {
        if selector.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "selectors.{} cannot be empty",
                field
            )));
        }

        Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;
    }
    Ok(())
}
