// Data types shared across kubed's components.

// Per-step outcomes for the end-of-run summary.
pub mod mutation;
// `config.yaml` settings.
pub mod settings;
// Detected shell and its startup file.
pub mod shell_profile;
// Tool descriptors and the default catalog.
pub mod tools;
// Stage-by-stage record of one setup run.
pub mod setup_report;
