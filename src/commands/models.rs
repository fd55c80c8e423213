use clap::ValueEnum;
use std::path::PathBuf;

/// Output projection of the final statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON record per function
    #[default]
    Jsonl,
    /// Aligned table, most called functions first
    Text,
}

/// Arguments for the collect command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct CollectArgs {
    /// Package patterns (e.g. `./...`)
    pub patterns: Vec<String>,

    /// Output projection
    pub format: OutputFormat,

    /// Output file (stdout when None)
    pub output: Option<PathBuf>,

    /// Include `_test.go` files
    pub include_tests: bool,

    /// Optional TOML settings file
    pub config: Option<PathBuf>,
}

impl Default for CollectArgs {
    fn default() -> Self {
        Self {
            patterns: vec!["./...".to_string()],
            format: OutputFormat::Jsonl,
            output: None,
            include_tests: false,
            config: None,
        }
    }
}

/// Arguments for the render command
#[derive(Debug, Clone, Default)]
pub struct RenderArgs {
    /// Record stream produced by `collect`
    pub input: PathBuf,

    /// Output file (stdout when None)
    pub output: Option<PathBuf>,

    /// Optional TOML settings file
    pub config: Option<PathBuf>,
}
