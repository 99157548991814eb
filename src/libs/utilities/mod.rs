// Small helpers shared by the installers.

// OS/architecture detection for download URLs.
pub mod platform;
