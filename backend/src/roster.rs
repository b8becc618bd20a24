// Static voter roster and fuzzy name matching

use std::fs;

use rocket::serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Served when a voter name cannot be matched to any roster entry.
pub const PLACEHOLDER_AVATAR: &str = "/avatars/placeholder.png";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct RosterEntry {
    pub name: String,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: String,
}

/// The full set of expected participants, loaded once at startup from a
/// JSON asset and kept in its configured order.
#[derive(Debug, Clone)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    /// Read the roster asset (a JSON array of `{"name", "avatarUrl"}`
    /// objects). A missing or malformed file aborts startup.
    pub fn load(path: &str) -> Self {
        let raw = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read roster file {}: {}", path, e));
        let entries: Vec<RosterEntry> = serde_json::from_str(&raw)
            .unwrap_or_else(|e| panic!("Failed to parse roster file {}: {}", path, e));
        Self { entries }
    }

    pub fn from_entries(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }

    /// Every roster entry, in file order.
    pub fn all_voters(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Resolve the avatar for a submitted voter name. Tries an exact
    /// first-name match, then case-insensitive, then slug equality, and
    /// falls back to the placeholder. Never fails.
    pub fn avatar_url_for(&self, voter_name: &str) -> String {
        let search_name = first_name(voter_name);

        if let Some(entry) = self.entries.iter().find(|e| e.name == search_name) {
            return entry.avatar_url.clone();
        }

        let lower_name = search_name.to_lowercase();
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.name.to_lowercase() == lower_name)
        {
            return entry.avatar_url.clone();
        }

        let search_slug = slugify_name(search_name);
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| slugify_name(&e.name) == search_slug)
        {
            return entry.avatar_url.clone();
        }

        PLACEHOLDER_AVATAR.to_string()
    }
}

/// Whether a submitted voter name refers to a roster name. Tiers, first
/// success wins: exact equality, then case-insensitive first name (the
/// roster stores first names only), then accent- and punctuation-
/// insensitive slug equality. All tiers are always attempted.
pub fn names_match(submitted_name: &str, roster_name: &str) -> bool {
    if submitted_name == roster_name {
        return true;
    }

    let first = first_name(submitted_name);
    if first.to_lowercase() == roster_name.to_lowercase() {
        return true;
    }

    slugify_name(first) == slugify_name(roster_name)
}

/// First whitespace-separated token of a full name.
fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or("")
}

/// Decompose accents away, lowercase, and keep only ASCII letters and
/// digits. The people-name cousin of `candy::normalize_candy_name`.
fn slugify_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
