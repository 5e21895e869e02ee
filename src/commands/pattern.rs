//! `fixturecap pattern` command.

use crate::exchange::strip_query;
use crate::pattern::generalize;

/// Execute the `pattern` command.
///
/// # Errors
///
/// Never fails.
pub fn run(path: &str) -> Result<(), String> {
    println!("{}", generalize(strip_query(path)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn pattern_command_runs() {
        assert!(run("/api/v1/users/me/goals.json?count=3").is_ok());
    }
}
