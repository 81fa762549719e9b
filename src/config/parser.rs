use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the JSON configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use kb_harvest::config::load_config;
///
/// let config = load_config(Path::new("config.json")).unwrap();
/// println!("Base URL: {}", config.base_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a JSON string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// SHA-256 of a configuration file, hex encoded
///
/// Logged at startup so that artifacts can be traced back to the
/// configuration that produced them.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(digest(&content))
}

/// Loads a configuration together with the hash of the exact bytes parsed
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, digest(&content)))
}

fn digest(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"{
            "kb_entry_point_urls": ["https://community.example.com/kb/toc"],
            "forum_entry_point_urls": ["https://community.example.com/forum/solved"],
            "base_url": "https://community.example.com",
            "html_storage_path": "./data"
        }"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.kb_entry_points.len(), 1);
        assert_eq!(config.forum_entry_points.len(), 1);
        assert_eq!(config.base_url, "https://community.example.com");
        assert_eq!(config.html_storage_path, "./data");
        assert_eq!(config.crawler.max_concurrent, 50);
        assert_eq!(config.selectors.kb_toc_links, "div.toc-main a[href]");
    }

    #[test]
    fn test_load_config_with_overrides() {
        let config_content = r#"{
            "base_url": "https://community.example.com",
            "html_storage_path": "./data",
            "crawler": { "max_concurrent": 4 },
            "selectors": { "kb_article": "main article" }
        }"#;

        let config = parse_config(config_content).unwrap();
        assert!(config.kb_entry_points.is_empty());
        assert_eq!(config.crawler.max_concurrent, 4);
        assert_eq!(config.crawler.request_timeout_secs, 30);
        assert_eq!(config.selectors.kb_article, "main article");
        assert_eq!(config.selectors.forum_next_page, "a.next-page[href]");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_json() {
        let file = create_temp_config("{ this is not json");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_missing_base_url() {
        let result = parse_config(r#"{ "html_storage_path": "./data" }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"{
            "base_url": "https://community.example.com",
            "html_storage_path": "./data",
            "crawler": { "max_concurrent": 0 }
        }"#;

        let result = parse_config(config_content);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_load_config_with_hash_matches_file_hash() {
        let file = create_temp_config(
            r#"{ "base_url": "https://community.example.com", "html_storage_path": "./data" }"#,
        );

        let (config, hash) = load_config_with_hash(file.path()).unwrap();
        assert_eq!(config.base_url, "https://community.example.com");
        assert_eq!(hash, compute_config_hash(file.path()).unwrap());
    }
}
