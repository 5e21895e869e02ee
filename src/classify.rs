//! Ordered endpoint classification.
//!
//! A request path is mapped to a `(category, operation)` pair by testing it
//! against an ordered list of anchored patterns. The first matching rule
//! wins, so a sub-resource rule must sit before any broader rule that would
//! also match once identifiers are substituted (for example `create_all`
//! before the single-datapoint rule, and every goal action before the
//! single-goal rule).

use std::sync::LazyLock;

use regex::Regex;

/// Category assigned to endpoints with destructive side effects.
pub const DANGER: &str = "danger";

/// `(pattern, category, operation)` for the recorded API, in match order.
const CATALOG: &[(&str, &str, &str)] = &[
    (r"/api/v1/auth_token\.json", "auth", "get_token"),
    (r"/api/v1/users/[^/]+\.json", "user", "get_user"),
    (r"/api/v1/users/[^/]+/goals\.json", "goals", "get_goals"),
    (r"/api/v1/users/[^/]+/goals/archived\.json", "goals", "get_archived"),
    (r"/api/v1/users/[^/]+/goals/[^/]+/datapoints\.json", "datapoints", "list"),
    (r"/api/v1/users/[^/]+/goals/[^/]+/datapoints/create_all\.json", "datapoints", "create_all"),
    (r"/api/v1/users/[^/]+/goals/[^/]+/datapoints/[^/]+\.json", "datapoints", "single"),
    (r"/api/v1/users/[^/]+/goals/[^/]+/refresh_graph\.json", "goals", "refresh_graph"),
    (r"/api/v1/users/[^/]+/goals/[^/]+/shortcircuit\.json", DANGER, "shortcircuit"),
    (r"/api/v1/users/[^/]+/goals/[^/]+/stepdown\.json", DANGER, "stepdown"),
    (r"/api/v1/users/[^/]+/goals/[^/]+/cancel_stepdown\.json", DANGER, "cancel_stepdown"),
    (r"/api/v1/users/[^/]+/goals/[^/]+/uncleme\.json", DANGER, "uncleme"),
    (r"/api/v1/users/[^/]+/goals/[^/]+\.json", "goals", "get_goal"),
    (r"/api/v1/charges\.json", DANGER, "charge"),
];

static DEFAULT_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(|| {
    // The catalog is a compile-time constant covered by the tests below.
    Classifier::new(CATALOG).unwrap_or_else(|err| panic!("endpoint catalog is invalid: {err}"))
});

/// The `(category, operation)` tag assigned to a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Endpoint family, also the fixture subdirectory.
    pub category: String,
    /// Operation name, used in the fixture file name.
    pub operation: String,
}

impl Classification {
    /// Returns `true` for endpoints that change live account state.
    #[must_use]
    pub fn is_danger(&self) -> bool {
        self.category == DANGER
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.category, self.operation)
    }
}

/// One entry of the ordered catalog.
#[derive(Debug, Clone)]
pub struct EndpointRule {
    /// Full-path anchored pattern.
    pub pattern: Regex,
    /// Category reported on match.
    pub category: String,
    /// Operation reported on match.
    pub operation: String,
}

impl EndpointRule {
    /// Compiles a rule, anchoring `pattern` to the whole path.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn new(pattern: &str, category: &str, operation: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!("^(?:{pattern})$"))?,
            category: category.to_string(),
            operation: operation.to_string(),
        })
    }

    fn classification(&self) -> Classification {
        Classification { category: self.category.clone(), operation: self.operation.clone() }
    }
}

/// First-match-wins classifier over an immutable, ordered rule list.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<EndpointRule>,
}

impl Classifier {
    /// Builds a classifier from `(pattern, category, operation)` triples.
    /// Order is preserved exactly.
    ///
    /// # Errors
    ///
    /// Returns the first pattern compilation error.
    pub fn new(rules: &[(&str, &str, &str)]) -> Result<Self, regex::Error> {
        let rules = rules
            .iter()
            .map(|(pattern, category, operation)| EndpointRule::new(pattern, category, operation))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The shared classifier for the recorded API.
    #[must_use]
    pub fn catalog() -> &'static Self {
        &DEFAULT_CLASSIFIER
    }

    /// Rules in match order.
    #[must_use]
    pub fn rules(&self) -> &[EndpointRule] {
        &self.rules
    }

    /// Classifies a query-free request path, or returns `None` when no rule
    /// matches. An unknown path is a normal outcome, not an error.
    #[must_use]
    pub fn classify(&self, path: &str) -> Option<Classification> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(path))
            .map(EndpointRule::classification)
    }
}

/// Classifies `path` against the shared catalog.
#[must_use]
pub fn classify(path: &str) -> Option<Classification> {
    Classifier::catalog().classify(path)
}
