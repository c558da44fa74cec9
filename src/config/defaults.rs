//! Compiled-in defaults for every configuration option

/// Hosts under the four academic subdomains of uci.edu
pub const DEFAULT_ALLOWED_DOMAIN_PATTERN: &str =
    r"^(?:.+\.)?(?:ics|cs|informatics|stat)\.uci\.edu$";

/// Binary, media and archive extensions that are never crawled
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    ".css", ".js", ".bmp", ".gif", ".jpe", ".jpeg", ".jpg", ".ico", ".png", ".tif", ".tiff",
    ".pdf", ".mp3", ".mp4", ".avi", ".mov", ".mpeg", ".tar", ".gz", ".zip", ".rar", ".swf",
    ".flv", ".wma", ".wmv", ".mid", ".bam", ".ppt",
];

/// Hosts ending with this suffix are tallied in the subdomain report
pub const DEFAULT_SUBDOMAIN_ROOT: &str = "ics.uci.edu";

/// Pages with fewer tokens than this are treated as low-information
pub const DEFAULT_MIN_WORDS_THRESHOLD: usize = 100;

/// A path shape seen more often than this is treated as a trap
pub const DEFAULT_TRAP_THRESHOLD: u32 = 10;

/// Number of words kept in the word-frequency report
pub const DEFAULT_TOP_WORDS_COUNT: usize = 50;

/// Directory the report files are written to
pub const DEFAULT_REPORT_DIR: &str = ".";
