// Candy name normalization for grouping spelling variants

use std::collections::HashMap;

/// Normalize a candy name into its grouping key: lowercase, keep only
/// ASCII letters and digits. "M&M's", "M&Ms" and "m ms" all map to "mms".
/// A name made entirely of stripped characters maps to the empty string,
/// which callers must treat as "no candy".
pub fn normalize_candy_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Pick the display spelling for a group from every original spelling
/// observed for it. The most frequent spelling wins; ties go to the
/// spelling encountered first. Empty input yields the empty string.
pub fn most_common_spelling(names: &[String]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *counts.entry(name.as_str()).or_insert(0) += 1;
    }

    let mut most_common = names.first().map(String::as_str).unwrap_or("");
    let mut max_count = 0;
    for name in names {
        let count = counts[name.as_str()];
        if count > max_count {
            max_count = count;
            most_common = name;
        }
    }

    most_common.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize_groups_spelling_variants() {
        assert_eq!(normalize_candy_name("M&M's"), "mms");
        assert_eq!(normalize_candy_name("M&Ms"), "mms");
        assert_eq!(normalize_candy_name("mms"), "mms");
        assert_eq!(normalize_candy_name("m ms"), "mms");
        assert_eq!(normalize_candy_name("Kit Kat"), "kitkat");
        assert_eq!(normalize_candy_name("KitKat"), "kitkat");
        assert_eq!(normalize_candy_name("Snickers"), "snickers");
    }

    #[test]
    fn normalize_keeps_distinct_candies_apart() {
        assert_ne!(
            normalize_candy_name("Reeses"),
            normalize_candy_name("Reese's Pieces")
        );
        // Misspellings do not group; the normalizer is not a fuzzy matcher.
        assert_ne!(
            normalize_candy_name("Skittles"),
            normalize_candy_name("Skitles")
        );
    }

    #[test]
    fn normalize_strips_to_empty() {
        assert_eq!(normalize_candy_name(""), "");
        assert_eq!(normalize_candy_name("???"), "");
        assert_eq!(normalize_candy_name(" & ' "), "");
    }

    #[test]
    fn most_common_spelling_majority_wins() {
        let names = strings(&["Reeses", "Reese's", "Reeses"]);
        assert_eq!(most_common_spelling(&names), "Reeses");
    }

    #[test]
    fn most_common_spelling_tie_goes_to_first_seen() {
        assert_eq!(most_common_spelling(&strings(&["A", "B"])), "A");
        assert_eq!(most_common_spelling(&strings(&["B", "A", "A", "B"])), "B");
    }

    #[test]
    fn most_common_spelling_empty_input() {
        assert_eq!(most_common_spelling(&[]), "");
    }
}
