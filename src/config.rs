// ABOUTME: Version and banner constants for the REPL

pub const VERSION: &str = "1.0.0";
pub const WELCOME_MESSAGE: &str = "Scheme REPL";
pub const WELCOME_SUBTITLE: &str = "A tree-walking Scheme interpreter (MIT/61A core subset)";
