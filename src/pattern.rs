//! Path generalization.
//!
//! Turns a concrete request path into an anchored regular expression that
//! matches the same endpoint for any user, goal, or datapoint identifier.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Marker substituted for one variable path segment.
pub const WILDCARD: &str = "[^/]+";

/// Prefixes whose following segment is an identifier, applied in order.
const VARIABLE_PREFIXES: [&str; 3] = ["users", "goals", "datapoints"];

static VARIABLE_SEGMENTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    VARIABLE_PREFIXES
        .iter()
        .map(|prefix| {
            // The identifier stops at `.` so a trailing format suffix stays literal.
            Regex::new(&format!("(/{prefix}/)[^/.]+"))
                .unwrap_or_else(|err| panic!("segment pattern for {prefix} is invalid: {err}"))
        })
        .collect()
});

/// Generalizes `path` into an anchored pattern.
///
/// Each identifier segment after `/users/`, `/goals/` and `/datapoints/` is
/// replaced by [`WILDCARD`]. Everything else, including `.json` style
/// suffixes, is kept literally with periods escaped.
///
/// ```
/// assert_eq!(
///     fixturecap::pattern::generalize("/api/v1/users/abc123/goals/weight.json"),
///     r"^/api/v1/users/[^/]+/goals/[^/]+\.json$",
/// );
/// ```
#[must_use]
pub fn generalize(path: &str) -> String {
    let mut pattern = path.to_string();
    for segment in VARIABLE_SEGMENTS.iter() {
        pattern = segment
            .replace_all(&pattern, |caps: &Captures<'_>| format!("{}{WILDCARD}", &caps[1]))
            .into_owned();
    }
    format!("^{}$", pattern.replace('.', r"\."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(path: &str) -> Regex {
        Regex::new(&generalize(path)).unwrap()
    }

    #[test]
    fn generalizes_user_and_goal() {
        let pattern = generalize("/api/v1/users/abc123/goals/weight.json");
        assert_eq!(pattern, r"^/api/v1/users/[^/]+/goals/[^/]+\.json$");

        let re = Regex::new(&pattern).unwrap();
        assert!(re.is_match("/api/v1/users/XYZ/goals/anything.json"));
        assert!(re.is_match("/api/v1/users/abc123/goals/weight.json"));
        assert!(!re.is_match("/api/v1/users/XYZ/goals/anythingXjson"));
        assert!(!re.is_match("/api/v1/users/X/Y/goals/anything.json"));
    }

    #[test]
    fn generalizes_datapoint_ids() {
        let pattern = generalize("/api/v1/users/alice/goals/weight/datapoints/5f1e.json");
        assert_eq!(pattern, r"^/api/v1/users/[^/]+/goals/[^/]+/datapoints/[^/]+\.json$");
    }

    #[test]
    fn leaves_collection_endpoints_literal() {
        assert_eq!(
            generalize("/api/v1/users/alice/goals.json"),
            r"^/api/v1/users/[^/]+/goals\.json$"
        );
        assert_eq!(generalize("/api/v1/charges.json"), r"^/api/v1/charges\.json$");
        assert_eq!(generalize("/api/v1/auth_token.json"), r"^/api/v1/auth_token\.json$");
    }

    #[test]
    fn escapes_every_period() {
        let pattern = generalize("/api/v1.2/status.json");
        assert_eq!(pattern, r"^/api/v1\.2/status\.json$");
        assert!(!compiled("/api/v1.2/status.json").is_match("/api/v1x2/status.json"));
    }

    #[test]
    fn action_segments_after_goal_stay_literal() {
        let re = compiled("/api/v1/users/alice/goals/weight/refresh_graph.json");
        assert!(re.is_match("/api/v1/users/bob/goals/pushups/refresh_graph.json"));
        assert!(!re.is_match("/api/v1/users/bob/goals/pushups/stepdown.json"));
    }

    #[test]
    fn generalized_pattern_matches_its_source_path() {
        let paths = [
            "/api/v1/auth_token.json",
            "/api/v1/users/alice.json",
            "/api/v1/users/alice/goals/archived.json",
            "/api/v1/users/alice/goals/weight/datapoints/create_all.json",
            "/api/v1/users/alice/goals/weight/uncleme.json",
            "/somewhere/else",
        ];
        for path in paths {
            assert!(compiled(path).is_match(path), "{path}");
        }
    }

    #[test]
    fn prefix_without_identifier_is_untouched() {
        assert_eq!(generalize("/users/.json"), r"^/users/\.json$");
        assert_eq!(generalize("/users/"), "^/users/$");
    }
}
