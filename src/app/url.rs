//! URL validation and normalization utilities.

use url::Url;

use crate::error_handling::ResolveError;

/// Validates and normalizes one input URL.
///
/// Surrounding whitespace is trimmed and `https://` is prepended when the
/// input carries no scheme at all. The result must parse as an absolute
/// http(s) URL with a host. Length is not limited; tracking links routinely
/// run to several kilobytes.
///
/// # Errors
///
/// Returns a [`ResolveError`] describing why the input was rejected. Callers
/// report it on that input's result and move on to the next one.
pub fn validate_and_normalize_url(input: &str) -> Result<Url, ResolveError> {
    let trimmed = input.trim();

    let normalized = if trimmed.contains("://") || trimmed.is_empty() {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&normalized).map_err(|e| ResolveError::InvalidUrl {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    if !is_web_url(&parsed) {
        return Err(ResolveError::UnsupportedScheme {
            input: input.to_string(),
            scheme: parsed.scheme().to_string(),
        });
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ResolveError::InvalidUrl {
            input: input.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(parsed)
}

/// True for `http` and `https` URLs, the only schemes the resolver follows
/// or reports.
pub fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
