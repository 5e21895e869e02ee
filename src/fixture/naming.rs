//! Fixture file naming.

/// Maps a response status to the suffix used in fixture names.
#[must_use]
pub fn status_suffix(status: u16) -> String {
    match status {
        200 => "valid".to_string(),
        401 => "invalid_auth".to_string(),
        404 => "not_found".to_string(),
        other => format!("error_{other}"),
    }
}

/// Returns `true` if `method` is a non-empty HTTP token (RFC 9110 `tchar`s).
///
/// Tokens cannot contain path separators, so a valid method never moves a
/// fixture out of its category directory.
#[must_use]
pub fn is_http_method(method: &str) -> bool {
    !method.is_empty()
        && method
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

/// Base file name (without extension) for a fixture:
/// `{method}_{operation}_{status_suffix}` with the method lowercased.
#[must_use]
pub fn fixture_name(method: &str, operation: &str, status: u16) -> String {
    format!("{}_{operation}_{}", method.to_lowercase(), status_suffix(status))
}

/// File name for the `attempt`-th candidate: `name.json`, then
/// `name_1.json`, `name_2.json`, ...
#[must_use]
pub fn candidate_file_name(name: &str, attempt: u64) -> String {
    if attempt == 0 {
        format!("{name}.json")
    } else {
        format!("{name}_{attempt}.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_have_names() {
        assert_eq!(status_suffix(200), "valid");
        assert_eq!(status_suffix(401), "invalid_auth");
        assert_eq!(status_suffix(404), "not_found");
    }

    #[test]
    fn other_statuses_embed_the_code() {
        assert_eq!(status_suffix(503), "error_503");
        assert_eq!(status_suffix(201), "error_201");
        assert_eq!(status_suffix(422), "error_422");
    }

    #[test]
    fn fixture_name_lowercases_method() {
        assert_eq!(fixture_name("GET", "get_goal", 200), "get_get_goal_valid");
        assert_eq!(fixture_name("POST", "create_all", 422), "post_create_all_error_422");
        assert_eq!(fixture_name("DELETE", "single", 404), "delete_single_not_found");
    }

    #[test]
    fn http_methods_are_tokens() {
        for method in ["GET", "post", "PROPFIND", "M-SEARCH"] {
            assert!(is_http_method(method), "{method}");
        }
        for method in ["", "../../x", "GET /", "a\\b", "P\u{f6}ST", "GET\n"] {
            assert!(!is_http_method(method), "{method:?}");
        }
    }

    #[test]
    fn candidates_count_up_from_one() {
        let names: Vec<String> = (0..3).map(|n| candidate_file_name("get_user", n)).collect();
        assert_eq!(names, ["get_user.json", "get_user_1.json", "get_user_2.json"]);
    }
}
