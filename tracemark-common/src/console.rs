//! ANSI console styling
//!
//! Escape sequences and line markers for the user-facing scan and
//! timeline output on stdout. Diagnostic logging goes through
//! `tracing`, not these.

/// Style and color escape codes.
pub mod style {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const UNDERLINE: &str = "\x1b[4m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
    pub const ORANGE: &str = "\x1b[38;5;208m";

    pub const RED_BG: &str = "\x1b[41m";
    pub const BLUE_BG: &str = "\x1b[44m";
    pub const WHITE_BG: &str = "\x1b[47;30m";
}

/// Line markers for scan progress and results.
pub mod marker {
    pub const LOG: &str = "\x1b[36m[*]\x1b[0m";
    pub const INFO: &str = "\x1b[32m[i]\x1b[0m";
    pub const FOUND: &str = "\x1b[33m[+]\x1b[0m";
}
