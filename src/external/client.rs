use std::sync::LazyLock;
use std::time::Duration;

/// Global HTTP client instance shared by every notification backend.
///
/// Initialized lazily on first access and reused for the whole dispatch:
/// connection pooling, DNS caching, and a single TLS stack instead of one
/// per target.
///
/// - **Timeouts**: 30s request timeout, 10s connect timeout
/// - **HTTP/2**: adaptive window sizing and keep-alive
/// - **Compression**: gzip, deflate, brotli, and zstd
/// - **Security**: Rustls for TLS
/// - **Identity**: static `notify-rs/<version>` user agent
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        // Enable compression (gzip, deflate, brotli, zstd)
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        // Security
        .https_only(false)
        .use_rustls_tls()
        .user_agent(concat!("notify-rs/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_initialization() {
        // Access the client to ensure it initializes without panicking
        let _ = &*HTTP_CLIENT;
    }
}
