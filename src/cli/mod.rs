// Command-line surface of kubed.
pub mod cmd_enums;
