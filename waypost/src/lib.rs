pub mod handlers;

// Re-export commonly used handler helpers for convenience
pub use handlers::{
    config_dir_arg, load_plan, open_database, render_marker, render_plan,
    resolve_timeline_options, validate_draft,
};
