pub const THREAD_NAME: &str = "session_gate";

/// Default cookie jar file standing in for the browser cookie store
pub const COOKIE_JAR_PATH: &str = "./session_cookies.json";
/// Page url assumed when the command does not take one
pub const DEFAULT_PAGE_URL: &str = "http://localhost/";
/// Default retention of the session cookie in days, as a clap default
pub const DEFAULT_RETENTION_DAYS: &str = "30";
/// Upper bound for `--retention-days` (about a century)
pub const MAX_RETENTION_DAYS: i64 = 36_500;
