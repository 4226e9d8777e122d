/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use std::time::Duration;

/// User agent string sent with every dispatched request
pub const USER_AGENT: &str = concat!("portal-client/", env!("CARGO_PKG_VERSION"));
/// Default per-request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Default value of the credentials-inclusion flag
pub const DEFAULT_WITH_CREDENTIALS: bool = true;
/// Default base URL used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
/// Lifetime of locally stored tokens, counted from the moment they are set
pub const TOKEN_TTL_DAYS: i64 = 7;

/// JSON media type, the default request content type
pub const CONTENT_TYPE_JSON: &str = "application/json";
/// URL-encoded form media type
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
/// Binary media type requested by downloads
pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";

/// Default multipart field name for single-file uploads
pub const DEFAULT_UPLOAD_FIELD: &str = "file";
/// File name used by downloads when the caller gives none
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "download";

/// Storage key of the access token
pub const ACCESS_TOKEN_KEY: &str = "token";
/// Storage key of the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Artifacts owned by the external auth middleware that logout must also clear
pub const EXTERNAL_SESSION_KEYS: [&str; 3] =
    ["next-auth.callback-url", "next-auth.csrf-token", "session"];

/// Default timeout as a [`Duration`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);
