//! `fixturecap catalog` command.

use crate::classify::Classifier;

/// Execute the `catalog` command.
///
/// # Errors
///
/// Never fails.
pub fn run() -> Result<(), String> {
    print!("{}", render(Classifier::catalog()));
    Ok(())
}

fn render(classifier: &Classifier) -> String {
    let width = classifier.rules().iter().map(|r| r.category.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (index, rule) in classifier.rules().iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {:<width$}  {:<16} {}\n",
            index + 1,
            rule.category,
            rule.operation,
            rule.pattern.as_str(),
        ));
    }
    out
}
