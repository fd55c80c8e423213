//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod collect;
pub mod models;
pub mod render;
pub mod utils;

// Re-export main command functions
pub use collect::{collect_stats, execute_collect, resolve_config, validate_args, write_stats};
pub use models::{CollectArgs, OutputFormat, RenderArgs};
pub use render::execute_render;
pub use utils::{display_schema, display_version};

