use url::Url;

/// Result of fetching a URL
#[derive(Clone, Debug)]
pub struct FetchResult {
    pub html: String,
    pub url: String,
    pub status: u16,
    pub content_type: String,
}

/// Error during fetch
pub struct FetchError {
    pub message: String,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Prefix scheme-less input with https.
pub fn normalize_url(url_str: &str) -> String {
    if !url_str.starts_with("http://") && !url_str.starts_with("https://") {
        format!("https://{}", url_str)
    } else {
        url_str.to_string()
    }
}

/// Fetch a URL and return the page content (blocking).
///
/// The body is decoded as UTF-8 (lossy) regardless of the declared charset.
pub fn fetch_url(url_str: &str) -> Result<FetchResult, FetchError> {
    let url = normalize_url(url_str);

    let parsed = Url::parse(&url).map_err(|e| FetchError {
        message: format!("Invalid URL: {}", e),
    })?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(
            "Mozilla/5.0 (compatible; wordlens/0.2; ",
            "+https://github.com/ext-sakamoro/wordlens)"
        ))
        .timeout(std::time::Duration::from_secs(15))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| FetchError {
            message: format!("Client error: {}", e),
        })?;

    let response = client
        .get(parsed.as_str())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7")
        .send()
        .map_err(|e| FetchError {
            message: format!("Request failed: {}", e),
        })?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    let final_url = response.url().to_string();

    let bytes = response.bytes().map_err(|e| FetchError {
        message: format!("Failed to read body: {}", e),
    })?;
    let html = String::from_utf8_lossy(&bytes).into_owned();

    Ok(FetchResult {
        html,
        url: final_url,
        status,
        content_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_less_input_becomes_https() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(
            normalize_url("https://example.com/a"),
            "https://example.com/a"
        );
    }

    #[test]
    fn garbage_url_is_a_recoverable_error() {
        let err = fetch_url("https://").unwrap_err();
        assert!(!err.message.is_empty());
    }
}
