use crate::render::TextRenderer;
use crate::utils::config::SCHEMA_VERSION;

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Call-Site Stats Record Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Record Structure (one JSON object per line):");
        println!("  function_name: string                       - Called function (simple or member name)");
        println!("  call_count: number                          - Call sites observed");
        println!("  argument_name_count: array?                 - Per argument position, name -> count");
        println!("  return_name_count: array?                   - Per assignment target, name -> count");
        println!("  return_ignored_count: number                - Calls whose results were not bound");
        println!("  multiple_assignment_count: number           - Calls bound to several targets");
        println!("  multiple_assignment_with_other_count: number - Calls sharing one assignment with other calls");
        println!();
        println!("Text Table:");
        println!("  {}", TextRenderer::<Vec<u8>>::usage());
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Call-Site Stats v{}", env!("CARGO_PKG_VERSION"));
    println!("Record Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Statistics of how each function in a Go codebase is called.");
}
