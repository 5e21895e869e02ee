//! Consistency check over a recorded fixture tree.
//!
//! Fixture consumers mount each document as a mock keyed on
//! `request.method` and `request.path_pattern`. A fixture is only useful if
//! that pattern compiles, matches the path it was recorded from, and sits in
//! the directory of the category its path classifies to.
//!
//! ```text
//! <root>/
//!   ├── auth/get_get_token_valid.json
//!   ├── goals/get_get_goals_valid.json
//!   └── user/get_get_user_invalid_auth.json
//! ```

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::classify::Classifier;
use crate::context::ServiceContext;
use crate::fixture::FixtureDocument;

/// What is wrong with one fixture file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// The file could not be read.
    Unreadable(String),
    /// The file is not a fixture document.
    Malformed(String),
    /// `request.path_pattern` is not a valid regular expression.
    InvalidPattern(String),
    /// `request.path_pattern` does not match `_meta.path`.
    PatternMismatch {
        /// Recorded pattern.
        pattern: String,
        /// Recorded path.
        path: String,
    },
    /// `_meta.path` classifies to a different category (or none).
    CategoryMismatch {
        /// Directory the file lives in.
        directory: String,
        /// Category the classifier assigns, if any.
        classified: Option<String>,
    },
    /// `_meta.method` and `request.method` disagree.
    MethodMismatch {
        /// Method in `_meta`.
        meta: String,
        /// Method in `request`.
        request: String,
    },
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable(err) => write!(f, "unreadable: {err}"),
            Self::Malformed(err) => write!(f, "not a fixture document: {err}"),
            Self::InvalidPattern(err) => write!(f, "invalid path_pattern: {err}"),
            Self::PatternMismatch { pattern, path } => {
                write!(f, "path_pattern {pattern} does not match {path}")
            }
            Self::CategoryMismatch { directory, classified: Some(category) } => {
                write!(f, "stored under {directory} but path classifies as {category}")
            }
            Self::CategoryMismatch { directory, classified: None } => {
                write!(f, "stored under {directory} but path is not in the catalog")
            }
            Self::MethodMismatch { meta, request } => {
                write!(f, "_meta.method {meta} differs from request.method {request}")
            }
        }
    }
}

/// A problem tied to the file it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureIssue {
    /// Offending file.
    pub path: PathBuf,
    /// What is wrong with it.
    pub problem: Problem,
}

/// Summary of a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryReport {
    /// Number of fixture files examined.
    pub checked: usize,
    /// Problems found, in directory order.
    pub issues: Vec<FixtureIssue>,
}

impl InventoryReport {
    /// Returns `true` when no problems were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Scans `<root>/<category>/*.json` and checks every fixture.
///
/// # Errors
///
/// Returns an error if `root` itself cannot be listed.
pub fn scan(
    ctx: &ServiceContext,
    root: &Path,
    classifier: &Classifier,
) -> Result<InventoryReport, String> {
    let categories = ctx
        .fs
        .list_dir(root)
        .map_err(|e| format!("Failed to list fixture root {}: {e}", root.display()))?;

    let mut report = InventoryReport::default();
    for category in categories {
        let dir = root.join(&category);
        // Stray files at the root are not category directories.
        let Ok(entries) = ctx.fs.list_dir(&dir) else {
            continue;
        };
        for name in entries.iter().filter(|name| name.ends_with(".json")) {
            let path = dir.join(name);
            report.checked += 1;
            for problem in check_file(ctx, &path, &category, classifier) {
                report.issues.push(FixtureIssue { path: path.clone(), problem });
            }
        }
    }
    Ok(report)
}

fn check_file(
    ctx: &ServiceContext,
    path: &Path,
    directory: &str,
    classifier: &Classifier,
) -> Vec<Problem> {
    let content = match ctx.fs.read_to_string(path) {
        Ok(content) => content,
        Err(err) => return vec![Problem::Unreadable(err.to_string())],
    };
    match serde_json::from_str::<FixtureDocument>(&content) {
        Ok(document) => check_document(&document, directory, classifier),
        Err(err) => vec![Problem::Malformed(err.to_string())],
    }
}

/// Checks one parsed document against the directory it was found in.
#[must_use]
pub fn check_document(
    document: &FixtureDocument,
    directory: &str,
    classifier: &Classifier,
) -> Vec<Problem> {
    let mut problems = Vec::new();

    match Regex::new(&document.request.path_pattern) {
        Ok(pattern) if !pattern.is_match(&document.meta.path) => {
            problems.push(Problem::PatternMismatch {
                pattern: document.request.path_pattern.clone(),
                path: document.meta.path.clone(),
            });
        }
        Ok(_) => {}
        Err(err) => problems.push(Problem::InvalidPattern(err.to_string())),
    }

    let classified = classifier.classify(&document.meta.path).map(|c| c.category);
    if classified.as_deref() != Some(directory) {
        problems.push(Problem::CategoryMismatch { directory: directory.to_string(), classified });
    }

    if document.meta.method != document.request.method {
        problems.push(Problem::MethodMismatch {
            meta: document.meta.method.clone(),
            request: document.request.method.clone(),
        });
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{FixedClock, MemoryFileSystem};
    use crate::config::RecorderConfig;
    use crate::exchange::Exchange;
    use crate::fixture::{FixtureRecorder, RecordOutcome};

    fn memory_context(fs: MemoryFileSystem) -> ServiceContext {
        let now = "2025-03-01T12:00:00Z".parse().unwrap();
        ServiceContext::new(Box::new(FixedClock::new(now)), Box::new(fs))
    }

    fn recorded(ctx: &ServiceContext, target: &str) -> PathBuf {
        let config =
            RecorderConfig { output_root: PathBuf::from("/rec"), ..RecorderConfig::default() };
        let recorder = FixtureRecorder::new(ctx, config);
        let exchange = Exchange::from_target("www.beeminder.com", "GET", target, 200, "{}");
        match recorder.record(&exchange).unwrap() {
            RecordOutcome::Saved(path) => path,
            other => panic!("expected saved fixture, got {other:?}"),
        }
    }

    #[test]
    fn freshly_recorded_tree_is_clean() {
        let ctx = memory_context(MemoryFileSystem::new());
        recorded(&ctx, "/api/v1/users/alice.json");
        recorded(&ctx, "/api/v1/users/alice/goals/weight/datapoints/abc.json");
        recorded(&ctx, "/api/v1/charges.json");

        let report = scan(&ctx, Path::new("/rec"), Classifier::catalog()).unwrap();

        assert_eq!(report.checked, 3);
        assert!(report.is_clean(), "{:?}", report.issues);
    }

    #[test]
    fn misplaced_fixture_is_reported() {
        let ctx = memory_context(MemoryFileSystem::new());
        let saved = recorded(&ctx, "/api/v1/auth_token.json");
        let content = ctx.fs.read_to_string(&saved).unwrap();
        ctx.fs.write_new(Path::new("/rec/goals"), "moved.json", &content).unwrap();

        let report = scan(&ctx, Path::new("/rec"), Classifier::catalog()).unwrap();

        assert_eq!(report.checked, 2);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].path, PathBuf::from("/rec/goals/moved.json"));
        assert_eq!(
            report.issues[0].problem,
            Problem::CategoryMismatch {
                directory: "goals".into(),
                classified: Some("auth".into())
            }
        );
    }

    #[test]
    fn malformed_and_non_json_files() {
        let fs = MemoryFileSystem::new();
        fs.insert("/rec/user/broken.json", "{ nope");
        fs.insert("/rec/user/notes.txt", "ignored");
        fs.insert("/rec/README.md", "ignored");
        let ctx = memory_context(fs);

        let report = scan(&ctx, Path::new("/rec"), Classifier::catalog()).unwrap();

        assert_eq!(report.checked, 1);
        assert!(matches!(report.issues[0].problem, Problem::Malformed(_)));
    }

    #[test]
    fn pattern_and_method_problems() {
        let ctx = memory_context(MemoryFileSystem::new());
        let saved = recorded(&ctx, "/api/v1/users/alice.json");
        let mut document: FixtureDocument =
            serde_json::from_str(&ctx.fs.read_to_string(&saved).unwrap()).unwrap();

        document.request.path_pattern = r"^/api/v1/charges\.json$".into();
        document.request.method = "POST".into();
        let problems = check_document(&document, "user", Classifier::catalog());
        assert_eq!(problems.len(), 2);
        assert!(matches!(problems[0], Problem::PatternMismatch { .. }));
        assert!(matches!(problems[1], Problem::MethodMismatch { .. }));

        document.request.path_pattern = "^(unclosed$".into();
        let problems = check_document(&document, "user", Classifier::catalog());
        assert!(matches!(problems[0], Problem::InvalidPattern(_)));
    }

    #[test]
    fn missing_root_is_an_error() {
        let ctx = memory_context(MemoryFileSystem::new());
        assert!(scan(&ctx, Path::new("/nowhere"), Classifier::catalog()).is_err());
    }

    #[test]
    fn problems_render_readably() {
        let problem = Problem::CategoryMismatch { directory: "goals".into(), classified: None };
        assert_eq!(problem.to_string(), "stored under goals but path is not in the catalog");
    }
}
