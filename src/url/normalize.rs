use crate::UrlError;

/// Screens a task URL and resolves it against the configured base URL
///
/// # Rejection Rules
///
/// The URL (after trimming surrounding whitespace) is rejected when it is:
/// - empty or a single character
/// - exactly `/`
/// - the base URL itself, with or without a trailing slash
///
/// # Normalization
///
/// A root-relative URL (`/path`) is rewritten as `base_url + /path`. Any other
/// URL, including absolute URLs on other domains, is returned unchanged.
///
/// # Examples
///
/// ```
/// use kb_harvest::url::validate_task_url;
///
/// let url = validate_task_url("/kb/article-1", "https://example.com").unwrap();
/// assert_eq!(url, "https://example.com/kb/article-1");
///
/// assert!(validate_task_url("https://example.com/", "https://example.com").is_err());
/// ```
pub fn validate_task_url(raw: &str, base_url: &str) -> Result<String, UrlError> {
    let url = raw.trim();
    let base = base_url.trim_end_matches('/');

    if url.chars().count() <= 1 || url == "/" || is_base_url(url, base) {
        return Err(UrlError::Rejected(raw.to_string()));
    }

    if url.starts_with('/') {
        return Ok(format!("{}{}", base, url));
    }

    Ok(url.to_string())
}

fn is_base_url(url: &str, base: &str) -> bool {
    url == base || url.strip_suffix('/') == Some(base)
}
