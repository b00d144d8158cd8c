pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{build_mirror_options, prepare_output_dir, report_format, resolve_output_dir};

// Re-export mirror functionality from webmirror-core
pub use webmirror_core::mirror::{MirrorOptions, MirrorSummary, execute_mirror, extract_url_path};
