//! Title suggestions for failed recommendation lookups.
//!
//! The backend matches recommendation queries against exact (lowercased)
//! titles, so a near-miss returns 404. This module ranks catalog titles
//! against the failed query so the CLI can offer alternatives.

/// Suggest up to `n` catalog titles matching `query`.
///
/// Matching is case-insensitive. Prefix matches rank before substring
/// matches; within each class, catalog order is preserved. An empty or
/// whitespace query yields no suggestions.
pub fn suggest_titles(query: &str, titles: &[String], n: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() || n == 0 {
        return Vec::new();
    }

    let mut prefix_matches = Vec::new();
    let mut substring_matches = Vec::new();

    for title in titles {
        let haystack = title.to_lowercase();
        if haystack.starts_with(&needle) {
            prefix_matches.push(title.clone());
        } else if haystack.contains(&needle) {
            substring_matches.push(title.clone());
        }

        if prefix_matches.len() >= n {
            break;
        }
    }

    prefix_matches.extend(substring_matches);
    prefix_matches.truncate(n);
    prefix_matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<String> {
        vec![
            "Wooden Desk Lamp".to_string(),
            "Shoe Rack Organizer".to_string(),
            "Free Standing Shoe Rack".to_string(),
            "shoe polish kit".to_string(),
        ]
    }

    #[test]
    fn test_prefix_before_substring() {
        let suggestions = suggest_titles("shoe", &catalog(), 5);

        assert_eq!(
            suggestions,
            vec![
                "Shoe Rack Organizer".to_string(),
                "shoe polish kit".to_string(),
                "Free Standing Shoe Rack".to_string(),
            ]
        );
    }

    #[test]
    fn test_case_insensitive() {
        let suggestions = suggest_titles("WOODEN", &catalog(), 5);
        assert_eq!(suggestions, vec!["Wooden Desk Lamp".to_string()]);
    }

    #[test]
    fn test_limit_respected() {
        let suggestions = suggest_titles("shoe", &catalog(), 2);
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        assert!(suggest_titles("   ", &catalog(), 5).is_empty());
        assert!(suggest_titles("shoe", &catalog(), 0).is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(suggest_titles("treadmill", &catalog(), 5).is_empty());
    }
}
