//! Shared networking constants and helpers used by server and client.

/// Default TCP port the frames server listens on.
pub const HTTP_PORT: u16 = 8080;
/// Interface the server binds to unless told otherwise.
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
/// Host the client polls unless told otherwise.
pub const DEFAULT_CLIENT_HOST: &str = "127.0.0.1";
/// Base URL of the market-data provider.
pub const POLYGON_BASE_URL: &str = "https://api.polygon.io";
/// Multi-ticker snapshot endpoint, relative to the base URL.
pub const SNAPSHOT_PATH: &str = "/v2/snapshot/locale/us/markets/stocks/tickers";
/// Path the device polls for frames.
pub const FRAMES_PATH: &str = "/frames";
/// Liveness probe path.
pub const HEALTH_PATH: &str = "/health";

/// Helper to format an address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Frames URL of a server at `ip:port`.
pub fn frames_url(ip: &str, port: u16) -> String {
    format!("http://{}{}", addr(ip, port), FRAMES_PATH)
}
