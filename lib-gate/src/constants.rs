/// Cookie holding the session token
pub const JWT_COOKIE_NAME: &str = "jwt_token";
/// Path scope of the session cookie
pub const COOKIE_PATH: &str = "/";
/// Default retention of the session cookie in days
pub const DEFAULT_RETENTION_DAYS: i64 = 30;
/// Period of the background expiry check
pub const RECHECK_INTERVAL_SEC: u64 = 60;
/// Query parameters carrying a token, in lookup order
pub const URL_TOKEN_PARAMS: [&str; 2] = ["jwt", "token"];
