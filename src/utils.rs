/// Get catalog feed URL from environment variable or use default
pub fn get_catalog_feed_url() -> String {
    std::env::var("CATALOG_FEED_URL").unwrap_or_else(|_| crate::constants::CATALOG_FEED_URL.to_string())
}

/// Get the CSFloat API key, if configured
pub fn get_csfloat_api_key() -> Option<String> {
    std::env::var("CSFLOAT_API_KEY").ok().filter(|key| !key.trim().is_empty())
}
