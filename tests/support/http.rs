use std::net::TcpListener;

use wiremock::MockServer;

/// Starts a mock HTTP server, or returns `None` when this machine forbids
/// binding a localhost port. Set `PUBSHELF_STRICT_HTTP_TESTS=1` to turn the
/// skip into a failure.
pub async fn mock_server() -> Option<MockServer> {
    match TcpListener::bind("127.0.0.1:0") {
        Ok(_) => Some(MockServer::start().await),
        Err(error) => {
            let strict = std::env::var("PUBSHELF_STRICT_HTTP_TESTS").is_ok_and(|v| v == "1");
            assert!(!strict, "localhost bind refused: {error}");
            eprintln!("skipping mock HTTP test: localhost bind refused ({error})");
            None
        }
    }
}
