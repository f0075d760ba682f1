/// Application name
pub const APP_NAME: &str = "Parley";

/// Platform string sent with push token registration
pub const PUSH_PLATFORM: &str = "android";

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default whole-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default page size for message history
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Maximum upload size in bytes (25 MiB)
pub const MAX_UPLOAD_SIZE: usize = 25 * 1024 * 1024;

/// Deep link scheme used by notification tap targets
pub const DEEP_LINK_SCHEME: &str = "parley";
