// Vote aggregation: per-candy tallies, per-person scores, and awards

use std::collections::HashMap;

use crate::candy::{most_common_spelling, normalize_candy_name};
use crate::models::{Awards, CandyStats, PersonStats, PureHeart, SpicyTake, StatsResponse, Vote};
use crate::roster::Roster;

/// Aggregate the full vote set into the dashboard statistics. Pure and
/// synchronous; callers pass votes in insertion order so that `perPerson`
/// ordering and award tie layout are reproducible.
pub fn compute_stats(votes: &[Vote], roster: &Roster) -> StatsResponse {
    if votes.is_empty() {
        return StatsResponse {
            awards: Awards {
                most_loved: Vec::new(),
                most_hated: Vec::new(),
                spiciest_take: Vec::new(),
                purest_heart: Vec::new(),
            },
            per_candy: Vec::new(),
            per_person: Vec::new(),
        };
    }

    let mut spellings: HashMap<String, Vec<String>> = HashMap::new();
    let mut likes: HashMap<String, i64> = HashMap::new();
    let mut hates: HashMap<String, i64> = HashMap::new();
    // First-seen order of every group that received a like or a hate, so
    // that tie layout does not depend on hash iteration order.
    let mut group_order: Vec<String> = Vec::new();

    for vote in votes {
        let love_slug = normalize_candy_name(&vote.love_vote);
        spellings
            .entry(love_slug.clone())
            .or_default()
            .push(vote.love_vote.clone());
        if !likes.contains_key(&love_slug) && !hates.contains_key(&love_slug) {
            group_order.push(love_slug.clone());
        }
        *likes.entry(love_slug).or_insert(0) += 1;

        let hate_slug = normalize_candy_name(&vote.hate_vote);
        spellings
            .entry(hate_slug.clone())
            .or_default()
            .push(vote.hate_vote.clone());
        if !likes.contains_key(&hate_slug) && !hates.contains_key(&hate_slug) {
            group_order.push(hate_slug.clone());
        }
        *hates.entry(hate_slug).or_insert(0) += 1;

        // Brought candy contributes display spellings only, never counts.
        let brought_slug = normalize_candy_name(&vote.brought_candy);
        spellings
            .entry(brought_slug)
            .or_default()
            .push(vote.brought_candy.clone());
    }

    // Names that normalize to nothing are "no candy" and never make the
    // leaderboard, though their tallies still feed per-person scores.
    let mut per_candy: Vec<CandyStats> = group_order
        .iter()
        .filter(|slug| !slug.is_empty())
        .map(|slug| {
            let like_count = likes.get(slug.as_str()).copied().unwrap_or(0);
            let hate_count = hates.get(slug.as_str()).copied().unwrap_or(0);
            let observed = spellings.get(slug.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            CandyStats {
                candy: most_common_spelling(observed),
                likes: like_count,
                hates: hate_count,
                net: like_count - hate_count,
            }
        })
        .collect();

    // Stable sort: tied nets keep first-observed order.
    per_candy.sort_by(|a, b| b.net.cmp(&a.net));

    let per_person: Vec<PersonStats> = votes
        .iter()
        .map(|vote| {
            let hate_slug = normalize_candy_name(&vote.hate_vote);
            let love_slug = normalize_candy_name(&vote.love_vote);
            PersonStats {
                name: vote.voter_name.clone(),
                avatar_url: roster.avatar_url_for(&vote.voter_name),
                hate_vote: vote.hate_vote.clone(),
                love_vote: vote.love_vote.clone(),
                // How many people loved what they trashed.
                spicy_score: likes.get(&hate_slug).copied().unwrap_or(0),
                // How many people hated what they champion.
                pure_score: hates.get(&love_slug).copied().unwrap_or(0),
            }
        })
        .collect();

    let max_likes = per_candy.iter().map(|c| c.likes).max().unwrap_or(0);
    let max_hates = per_candy.iter().map(|c| c.hates).max().unwrap_or(0);
    let max_spicy = per_person.iter().map(|p| p.spicy_score).max().unwrap_or(0);
    let max_pure = per_person.iter().map(|p| p.pure_score).max().unwrap_or(0);

    let most_loved = per_candy
        .iter()
        .filter(|c| c.likes == max_likes && max_likes > 0)
        .cloned()
        .collect();

    let most_hated = per_candy
        .iter()
        .filter(|c| c.hates == max_hates && max_hates > 0)
        .cloned()
        .collect();

    let spiciest_take = per_person
        .iter()
        .filter(|p| p.spicy_score == max_spicy && max_spicy > 0)
        .map(|p| SpicyTake {
            name: p.name.clone(),
            avatar_url: p.avatar_url.clone(),
            hate_vote: p.hate_vote.clone(),
            spicy_score: p.spicy_score,
        })
        .collect();

    let purest_heart = per_person
        .iter()
        .filter(|p| p.pure_score == max_pure && max_pure > 0)
        .map(|p| PureHeart {
            name: p.name.clone(),
            avatar_url: p.avatar_url.clone(),
            love_vote: p.love_vote.clone(),
            pure_score: p.pure_score,
        })
        .collect();

    StatsResponse {
        awards: Awards {
            most_loved,
            most_hated,
            spiciest_take,
            purest_heart,
        },
        per_candy,
        per_person,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{RosterEntry, PLACEHOLDER_AVATAR};

    fn vote(id: i32, name: &str, brought: &str, hate: &str, love: &str) -> Vote {
        Vote {
            id,
            created_at: None,
            voter_name: name.to_string(),
            brought_candy: brought.to_string(),
            hate_vote: hate.to_string(),
            love_vote: love.to_string(),
        }
    }

    fn empty_roster() -> Roster {
        Roster::from_entries(Vec::new())
    }

    /// The three-voter scenario: A loves Snickers hates Skittles, B loves
    /// Skittles hates Snickers, C loves Snickers hates Twix.
    fn three_voters() -> Vec<Vote> {
        vec![
            vote(1, "A", "Candy Corn", "Skittles", "Snickers"),
            vote(2, "B", "Laffy Taffy", "Snickers", "Skittles"),
            vote(3, "C", "Starburst", "Twix", "Snickers"),
        ]
    }

    fn candy<'a>(stats: &'a StatsResponse, name: &str) -> &'a CandyStats {
        stats
            .per_candy
            .iter()
            .find(|c| c.candy == name)
            .unwrap_or_else(|| panic!("no per-candy entry for {}", name))
    }

    #[test]
    fn zero_votes_yield_all_empty_stats() {
        let stats = compute_stats(&[], &empty_roster());
        assert!(stats.per_candy.is_empty());
        assert!(stats.per_person.is_empty());
        assert!(stats.awards.most_loved.is_empty());
        assert!(stats.awards.most_hated.is_empty());
        assert!(stats.awards.spiciest_take.is_empty());
        assert!(stats.awards.purest_heart.is_empty());
    }

    #[test]
    fn tallies_likes_hates_and_net() {
        let stats = compute_stats(&three_voters(), &empty_roster());

        let snickers = candy(&stats, "Snickers");
        assert_eq!((snickers.likes, snickers.hates, snickers.net), (2, 1, 1));

        let skittles = candy(&stats, "Skittles");
        assert_eq!((skittles.likes, skittles.hates, skittles.net), (1, 1, 0));

        let twix = candy(&stats, "Twix");
        assert_eq!((twix.likes, twix.hates, twix.net), (0, 1, -1));

        // Sorted by net, descending.
        let names: Vec<&str> = stats.per_candy.iter().map(|c| c.candy.as_str()).collect();
        assert_eq!(names, vec!["Snickers", "Skittles", "Twix"]);
    }

    #[test]
    fn most_loved_is_unique_and_most_hated_is_a_three_way_tie() {
        let stats = compute_stats(&three_voters(), &empty_roster());

        let loved: Vec<&str> = stats
            .awards
            .most_loved
            .iter()
            .map(|c| c.candy.as_str())
            .collect();
        assert_eq!(loved, vec!["Snickers"]);

        let mut hated: Vec<&str> = stats
            .awards
            .most_hated
            .iter()
            .map(|c| c.candy.as_str())
            .collect();
        hated.sort_unstable();
        assert_eq!(hated, vec!["Skittles", "Snickers", "Twix"]);
    }

    #[test]
    fn spicy_and_pure_scores_follow_the_aggregate() {
        let stats = compute_stats(&three_voters(), &empty_roster());

        let by_name = |name: &str| {
            stats
                .per_person
                .iter()
                .find(|p| p.name == name)
                .unwrap()
                .clone()
        };
        // A hated Skittles (1 like), B hated Snickers (2 likes), C hated
        // Twix (0 likes).
        assert_eq!(by_name("A").spicy_score, 1);
        assert_eq!(by_name("B").spicy_score, 2);
        assert_eq!(by_name("C").spicy_score, 0);
        // Everyone's loved candy has exactly one hater.
        assert_eq!(by_name("A").pure_score, 1);
        assert_eq!(by_name("B").pure_score, 1);
        assert_eq!(by_name("C").pure_score, 1);

        let spiciest: Vec<&str> = stats
            .awards
            .spiciest_take
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(spiciest, vec!["B"]);

        let purest: Vec<&str> = stats
            .awards
            .purest_heart
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(purest, vec!["A", "B", "C"]);
    }

    #[test]
    fn spelling_variants_tally_as_one_group() {
        let votes = vec![
            vote(1, "A", "Twix", "Candy Corn", "M&M's"),
            vote(2, "B", "Skittles", "Twix", "M&Ms"),
            vote(3, "C", "Snickers", "Twix", "M&M's"),
        ];
        let stats = compute_stats(&votes, &empty_roster());

        let mms = candy(&stats, "M&M's");
        assert_eq!(mms.likes, 3);
        assert_eq!(mms.hates, 0);
    }

    #[test]
    fn brought_candy_shapes_display_names_but_not_counts() {
        // Three people bring "Mms"; one person loves it as "M&M's". The
        // brought spellings win the display name, the like count stays 1.
        let votes = vec![
            vote(1, "A", "Mms", "Twix", "M&M's"),
            vote(2, "B", "Mms", "Twix", "Skittles"),
            vote(3, "C", "Mms", "Skittles", "Snickers"),
        ];
        let stats = compute_stats(&votes, &empty_roster());

        let mms = candy(&stats, "Mms");
        assert_eq!(mms.likes, 1);
        assert_eq!(mms.hates, 0);
        assert!(stats.per_candy.iter().all(|c| c.candy != "M&M's"));
    }

    #[test]
    fn empty_normalizing_names_are_excluded_from_the_leaderboard() {
        let votes = vec![vote(1, "A", "Twix", "Skittles", "???")];
        let stats = compute_stats(&votes, &empty_roster());

        assert_eq!(stats.per_candy.len(), 1);
        assert_eq!(stats.per_candy[0].candy, "Skittles");
        // No likes survive the filter, so the award is suppressed.
        assert!(stats.awards.most_loved.is_empty());
    }

    #[test]
    fn all_zero_scores_suppress_person_awards() {
        // Nobody loves what anybody hates, and nobody hates what anybody
        // loves.
        let votes = vec![
            vote(1, "A", "Twix", "Candy Corn", "Snickers"),
            vote(2, "B", "Skittles", "Mounds", "Snickers"),
        ];
        let stats = compute_stats(&votes, &empty_roster());

        assert!(stats.awards.spiciest_take.is_empty());
        assert!(stats.awards.purest_heart.is_empty());
        let loved: Vec<&str> = stats
            .awards
            .most_loved
            .iter()
            .map(|c| c.candy.as_str())
            .collect();
        assert_eq!(loved, vec!["Snickers"]);
    }

    #[test]
    fn duplicate_voters_each_get_a_per_person_entry() {
        let votes = vec![
            vote(1, "A", "Twix", "Skittles", "Snickers"),
            vote(2, "A", "Twix", "Mounds", "Skittles"),
        ];
        let stats = compute_stats(&votes, &empty_roster());

        assert_eq!(stats.per_person.len(), 2);
        assert_eq!(stats.per_person[0].name, "A");
        assert_eq!(stats.per_person[1].name, "A");
    }

    #[test]
    fn per_person_follows_input_order_and_resolves_avatars() {
        let roster = Roster::from_entries(vec![RosterEntry {
            name: "Bob".to_string(),
            avatar_url: "/avatars/bob.png".to_string(),
        }]);
        let votes = vec![
            vote(1, "Zed", "Twix", "Skittles", "Snickers"),
            vote(2, "bob smith", "Skittles", "Twix", "Mounds"),
        ];
        let stats = compute_stats(&votes, &roster);

        assert_eq!(stats.per_person[0].name, "Zed");
        assert_eq!(stats.per_person[0].avatar_url, PLACEHOLDER_AVATAR);
        assert_eq!(stats.per_person[1].name, "bob smith");
        assert_eq!(stats.per_person[1].avatar_url, "/avatars/bob.png");
    }

    #[test]
    fn recomputation_is_idempotent() {
        let votes = three_voters();
        let roster = empty_roster();
        assert_eq!(compute_stats(&votes, &roster), compute_stats(&votes, &roster));
    }
}
