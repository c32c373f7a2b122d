//! CLI argument validators.

/// Parse and validate the base URL of a nestwatch server.
pub fn parse_base_url(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| format!("'{s}' must start with http:// or https://"))?;

    if rest.trim_matches('/').is_empty() {
        return Err(format!("'{s}' has no host"));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_valid() {
        assert_eq!(
            parse_base_url("http://localhost:5080/").ok(),
            Some("http://localhost:5080".to_string())
        );
        assert_eq!(
            parse_base_url("https://nests.example.org").ok(),
            Some("https://nests.example.org".to_string())
        );
    }

    #[test]
    fn test_parse_base_url_invalid() {
        assert!(parse_base_url("localhost:5080").is_err());
        assert!(parse_base_url("ftp://host").is_err());
        assert!(parse_base_url("http://").is_err());
    }
}
