pub mod config;
pub mod handlers;

pub use config::{Settings, load_settings};

// Re-export commonly used handler functions for convenience
pub use handlers::{
    InteractiveCommand, build_controller, check_health, parse_interactive_line, run_scan,
};
