//! Helpers for talking to the search API.

/// Base URL for API requests, derived from the current window location.
/// The search service listens on port 3000 next to the static host.
///
/// Returns an empty string if window is not available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Full URL of the search endpoint for one collection ("stores", "products").
pub fn search_url(collection: &str) -> String {
    format!("{}/api/search/{}", api_base(), collection)
}
