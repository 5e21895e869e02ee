//! `fixturecap classify` command.

use crate::classify::classify;
use crate::exchange::strip_query;

/// Execute the `classify` command.
///
/// # Errors
///
/// Never fails; an unknown path is reported as `unknown`.
pub fn run(path: &str) -> Result<(), String> {
    println!("{}", render(path));
    Ok(())
}

fn render(path: &str) -> String {
    classify(strip_query(path)).map_or_else(|| "unknown".to_string(), |c| c.to_string())
}
