use pkgmirror_library::constants::{
    DEFAULT_ARCHIVE_BASE_URL, DEFAULT_INDEX_URL, DEFAULT_REQUEST_TIMEOUT,
};

pub const IMPORT_SUCCESS_RESPONSE: &str = "success";
pub const SQLITE_BUSY_TIMEOUT_MILLISECONDS: u64 = 5000;

pub fn default_index_url() -> String {
    DEFAULT_INDEX_URL.to_string()
}

pub fn default_archive_base_url() -> String {
    DEFAULT_ARCHIVE_BASE_URL.to_string()
}

pub const fn default_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}
