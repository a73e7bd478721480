pub mod api {
    pub const DEFAULT_BASE_URL: &str = "https://my.clockodo.com/api";
    pub const HEADER_API_USER: &str = "X-ClockodoApiUser";
    pub const HEADER_API_KEY: &str = "X-ClockodoApiKey";
    pub const HEADER_EXTERNAL_APPLICATION: &str = "X-Clockodo-External-Application";
    pub const APPLICATION_NAME: &str = "clockodo-mcp";

    pub const PATH_ENTRIES: &str = "/v2/entries";
    pub const PATH_USERS: &str = "/v2/users";
    pub const PATH_CUSTOMERS: &str = "/v2/customers";
    pub const PATH_PROJECTS: &str = "/v2/projects";
    pub const PATH_SERVICES: &str = "/v2/services";
    pub const PATH_CLOCK: &str = "/v2/clock";
}

pub mod env {
    pub const API_USER: &str = "CLOCKODO_API_USER";
    pub const API_KEY: &str = "CLOCKODO_API_KEY";
    pub const BASE_URL: &str = "CLOCKODO_BASE_URL";
    pub const EXTERNAL_APPLICATION: &str = "CLOCKODO_EXTERNAL_APPLICATION";
    pub const TIMEOUT_MS: &str = "CLOCKODO_TIMEOUT_MS";
    pub const ENV_FILE: &str = "CLOCKODO_ENV_FILE";
    pub const LOG_LEVEL: &str = "CLOCKODO_LOG_LEVEL";
    pub const LOG_LEVEL_FALLBACK: &str = "LOG_LEVEL";
}

pub mod network {
    pub const TIMEOUT_API_REQUEST_MS: u64 = 30_000;
}

pub mod limits {
    pub const MAX_SUGGESTIONS: usize = 5;
    pub const MAX_SCHEMA_ERRORS: usize = 10;
}

pub mod formats {
    pub const DATE: &str = "%Y-%m-%d";
    pub const TIME: &str = "%H:%M";
    pub const API_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%SZ";
    pub const DISPLAY_DATETIME: &str = "%d.%m.%Y, %H:%M";
}
