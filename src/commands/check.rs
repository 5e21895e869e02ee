//! `fixturecap check` command.

use std::path::Path;

use crate::classify::Classifier;
use crate::context::ServiceContext;
use crate::inventory::{self, InventoryReport};

/// Execute the `check` command.
///
/// # Errors
///
/// Returns an error string if the root cannot be listed or any fixture has
/// a problem.
pub fn run(root: &Path) -> Result<(), String> {
    let ctx = ServiceContext::live();
    let report = inventory::scan(&ctx, root, Classifier::catalog())?;
    print!("{}", render(&report));
    if report.is_clean() {
        Ok(())
    } else {
        Err(format!("{} problem(s) in {}", report.issues.len(), root.display()))
    }
}

fn render(report: &InventoryReport) -> String {
    let mut out = String::new();
    for issue in &report.issues {
        out.push_str(&format!("{}: {}\n", issue.path.display(), issue.problem));
    }
    out.push_str(&format!("checked {} fixture(s)\n", report.checked));
    out
}
