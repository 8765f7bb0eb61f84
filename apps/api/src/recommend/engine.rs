//! Hybrid listing recommender — collaborative filtering blended with
//! content similarity over animal traits.
//!
//! Every stage is a pure function over in-memory collections so the scoring
//! pipeline is testable without a database:
//! 1. `recent_likes` — the 10 most recently created listings the user likes
//! 2. `similar_users` — other users sharing at least one liked listing
//! 3. `cf_signals` — per-candidate collaborative-filter score
//! 4. `content_scores` — per-candidate trait-match count against recent likes
//! 5. `merge_and_rank` — union, weight, sort, cap at 20

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

/// Hard cap on the returned recommendation list.
pub const MAX_RECOMMENDATIONS: usize = 20;
/// How many of the user's likes feed the content-similarity branch.
pub const RECENT_LIKES_WINDOW: usize = 10;
/// Weight of the collaborative-filter score in the final blend.
pub const CF_WEIGHT: i64 = 3;
/// Weight of the content-similarity score in the final blend.
pub const CONTENT_WEIGHT: i64 = 2;

/// The animal attributes used for content similarity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimalTraits {
    pub species: String,
    pub breed: Option<String>,
    pub located_name: Option<String>,
}

/// A listing the requesting user has favorited.
#[derive(Debug, Clone)]
pub struct LikedListing {
    pub listing_id: i64,
    pub created_at: DateTime<Utc>,
    pub traits: AnimalTraits,
}

/// A recommendation-eligible listing: ACTIVE, not owned by the requester,
/// not already favorited by the requester.
#[derive(Debug, Clone)]
pub struct CandidateListing {
    pub listing_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub traits: AnimalTraits,
}

/// A (client, listing) favorite pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Favorite {
    pub client_id: i64,
    pub listing_id: i64,
}

/// Collaborative-filter contribution for one candidate listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CfSignal {
    pub cf_score: i64,
    pub liked_by_similar_users: i64,
}

/// A candidate with all component scores resolved.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub listing: CandidateListing,
    pub cf_score: i64,
    pub liked_by_similar_users: i64,
    pub content_score: i64,
    pub final_score: i64,
}

/// The user's likes ordered by *listing* creation time (not favorite time),
/// newest first, capped at `RECENT_LIKES_WINDOW`.
pub fn recent_likes(my_likes: &[LikedListing]) -> Vec<LikedListing> {
    let mut sorted = my_likes.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(RECENT_LIKES_WINDOW);
    sorted
}

/// Maps each other user to their `overlap_likes`: how many of the requesting
/// user's liked listings they have also favorited.
pub fn similar_users(
    user_id: i64,
    co_favorites: &[Favorite],
    my_like_ids: &HashSet<i64>,
) -> HashMap<i64, i64> {
    let mut overlap = HashMap::new();
    for fav in co_favorites {
        if fav.client_id == user_id || !my_like_ids.contains(&fav.listing_id) {
            continue;
        }
        *overlap.entry(fav.client_id).or_insert(0) += 1;
    }
    overlap
}

/// Accumulates collaborative-filter signals over the favorites of similar
/// users. A listing already liked by the requester never becomes a candidate.
/// `cf_score` sums the contributing users' overlap; `liked_by_similar_users`
/// counts distinct contributors.
pub fn cf_signals(
    overlap_by_user: &HashMap<i64, i64>,
    similar_favorites: &[Favorite],
    my_like_ids: &HashSet<i64>,
) -> HashMap<i64, CfSignal> {
    let mut contributors: HashMap<i64, HashSet<i64>> = HashMap::new();
    let mut signals: HashMap<i64, CfSignal> = HashMap::new();
    for fav in similar_favorites {
        let Some(overlap) = overlap_by_user.get(&fav.client_id) else {
            continue;
        };
        if my_like_ids.contains(&fav.listing_id) {
            continue;
        }
        // A (client, listing) favorite is unique, but guard anyway so a
        // duplicated input row cannot double-count a contributor.
        if contributors
            .entry(fav.listing_id)
            .or_default()
            .insert(fav.client_id)
        {
            let signal = signals.entry(fav.listing_id).or_default();
            signal.cf_score += overlap;
            signal.liked_by_similar_users += 1;
        }
    }
    signals
}

/// Two animals match when they share species, breed, or location.
/// Absent breed/location never matches (SQL NULL-equality semantics).
pub fn traits_match(a: &AnimalTraits, b: &AnimalTraits) -> bool {
    a.species == b.species
        || opt_eq(&a.breed, &b.breed)
        || opt_eq(&a.located_name, &b.located_name)
}

fn opt_eq(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}

/// Per-candidate content score: the number of recent likes the candidate
/// matches. One candidate can match several recent likes and is counted once
/// per match.
pub fn content_scores(
    recent: &[LikedListing],
    candidates: &[CandidateListing],
) -> HashMap<i64, i64> {
    let mut scores = HashMap::new();
    for candidate in candidates {
        let matched = recent
            .iter()
            .filter(|liked| traits_match(&candidate.traits, &liked.traits))
            .count() as i64;
        if matched > 0 {
            scores.insert(candidate.listing_id, matched);
        }
    }
    scores
}

/// Unions the CF and content branches (missing scores default to zero),
/// computes the weighted final score, sorts by score, then recency, then
/// ascending listing id, and caps the list. Candidates absent from both
/// branches are dropped.
pub fn merge_and_rank(
    candidates: Vec<CandidateListing>,
    cf: &HashMap<i64, CfSignal>,
    content: &HashMap<i64, i64>,
) -> Vec<ScoredCandidate> {
    let mut merged: Vec<ScoredCandidate> = candidates
        .into_iter()
        .filter_map(|listing| {
            let cf_signal = cf.get(&listing.listing_id).copied();
            let content_score = content.get(&listing.listing_id).copied();
            if cf_signal.is_none() && content_score.is_none() {
                return None;
            }
            let cf_signal = cf_signal.unwrap_or_default();
            let content_score = content_score.unwrap_or(0);
            let final_score = cf_signal.cf_score * CF_WEIGHT + content_score * CONTENT_WEIGHT;
            Some(ScoredCandidate {
                listing,
                cf_score: cf_signal.cf_score,
                liked_by_similar_users: cf_signal.liked_by_similar_users,
                content_score,
                final_score,
            })
        })
        .collect();
    merged.sort_by(|a, b| {
        b.final_score
            .cmp(&a.final_score)
            .then(b.listing.created_at.cmp(&a.listing.created_at))
            .then(a.listing.listing_id.cmp(&b.listing.listing_id))
    });
    merged.truncate(MAX_RECOMMENDATIONS);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap()
    }

    fn dog(breed: &str, location: &str) -> AnimalTraits {
        AnimalTraits {
            species: "Dog".to_string(),
            breed: Some(breed.to_string()),
            located_name: Some(location.to_string()),
        }
    }

    fn liked(listing_id: i64, day: u32, traits: AnimalTraits) -> LikedListing {
        LikedListing {
            listing_id,
            created_at: ts(day),
            traits,
        }
    }

    fn candidate(listing_id: i64, day: u32, traits: AnimalTraits) -> CandidateListing {
        CandidateListing {
            listing_id,
            title: format!("pet-{listing_id}"),
            created_at: ts(day),
            traits,
        }
    }

    fn fav(client_id: i64, listing_id: i64) -> Favorite {
        Favorite {
            client_id,
            listing_id,
        }
    }

    #[test]
    fn test_recent_likes_orders_by_listing_creation_desc() {
        let likes = vec![
            liked(1, 3, dog("Labrador", "Austin")),
            liked(2, 9, dog("Poodle", "Dallas")),
            liked(3, 6, dog("Beagle", "Austin")),
        ];
        let recent = recent_likes(&likes);
        let ids: Vec<i64> = recent.iter().map(|l| l.listing_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_recent_likes_caps_at_window() {
        let likes: Vec<LikedListing> = (1..=15)
            .map(|i| liked(i, i as u32, dog("Labrador", "Austin")))
            .collect();
        assert_eq!(recent_likes(&likes).len(), RECENT_LIKES_WINDOW);
    }

    #[test]
    fn test_similar_users_counts_shared_likes() {
        let my_likes: HashSet<i64> = [10, 11, 12].into();
        let co_favorites = vec![fav(2, 10), fav(2, 11), fav(3, 12), fav(4, 99)];
        let overlap = similar_users(1, &co_favorites, &my_likes);
        assert_eq!(overlap.get(&2), Some(&2));
        assert_eq!(overlap.get(&3), Some(&1));
        assert_eq!(overlap.get(&4), None);
    }

    #[test]
    fn test_similar_users_excludes_requester() {
        let my_likes: HashSet<i64> = [10].into();
        let overlap = similar_users(1, &[fav(1, 10)], &my_likes);
        assert!(overlap.is_empty());
    }

    #[test]
    fn test_cf_signals_sums_overlap_and_counts_contributors() {
        let overlap: HashMap<i64, i64> = [(2, 3), (3, 1)].into();
        let my_likes: HashSet<i64> = [10].into();
        // Both similar users favorite listing 20; user 2 also favorites 21.
        let similar_favorites = vec![fav(2, 20), fav(3, 20), fav(2, 21)];
        let signals = cf_signals(&overlap, &similar_favorites, &my_likes);
        assert_eq!(
            signals.get(&20),
            Some(&CfSignal {
                cf_score: 4,
                liked_by_similar_users: 2
            })
        );
        assert_eq!(
            signals.get(&21),
            Some(&CfSignal {
                cf_score: 3,
                liked_by_similar_users: 1
            })
        );
    }

    #[test]
    fn test_cf_signals_never_resurface_my_likes() {
        let overlap: HashMap<i64, i64> = [(2, 1)].into();
        let my_likes: HashSet<i64> = [10].into();
        let signals = cf_signals(&overlap, &[fav(2, 10)], &my_likes);
        assert!(signals.is_empty());
    }

    #[test]
    fn test_species_match_alone_suffices() {
        let recent = vec![liked(1, 1, dog("Labrador", "Austin"))];
        let candidates = vec![candidate(2, 2, dog("Poodle", "Dallas"))];
        let scores = content_scores(&recent, &candidates);
        assert_eq!(scores.get(&2), Some(&1));
    }

    #[test]
    fn test_breed_match_across_species() {
        let recent = vec![liked(1, 1, dog("Labrador", "Austin"))];
        let mut traits = dog("Labrador", "Dallas");
        traits.species = "Wolf".to_string();
        let scores = content_scores(&recent, &[candidate(2, 2, traits)]);
        assert_eq!(scores.get(&2), Some(&1));
    }

    #[test]
    fn test_missing_breed_and_location_never_match() {
        let recent = vec![liked(
            1,
            1,
            AnimalTraits {
                species: "Dog".to_string(),
                breed: None,
                located_name: None,
            },
        )];
        let cat = AnimalTraits {
            species: "Cat".to_string(),
            breed: None,
            located_name: None,
        };
        let scores = content_scores(&recent, &[candidate(2, 2, cat)]);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_content_score_counts_each_matching_recent_like() {
        let recent = vec![
            liked(1, 1, dog("Labrador", "Austin")),
            liked(2, 2, dog("Beagle", "Dallas")),
            liked(3, 3, dog("Poodle", "Houston")),
        ];
        let candidates = vec![candidate(4, 4, dog("Husky", "Reno"))];
        let scores = content_scores(&recent, &candidates);
        // Species "Dog" matches all three recent likes.
        assert_eq!(scores.get(&4), Some(&3));
    }

    #[test]
    fn test_merge_defaults_missing_scores_to_zero() {
        let candidates = vec![
            candidate(1, 1, dog("Labrador", "Austin")),
            candidate(2, 2, dog("Beagle", "Dallas")),
        ];
        let cf: HashMap<i64, CfSignal> = [(
            1,
            CfSignal {
                cf_score: 4,
                liked_by_similar_users: 2,
            },
        )]
        .into();
        let content: HashMap<i64, i64> = [(2, 1)].into();
        let ranked = merge_and_rank(candidates, &cf, &content);
        assert_eq!(ranked.len(), 2);

        let cf_only = ranked.iter().find(|c| c.listing.listing_id == 1).unwrap();
        assert_eq!(cf_only.content_score, 0);
        assert_eq!(cf_only.final_score, 12);

        let content_only = ranked.iter().find(|c| c.listing.listing_id == 2).unwrap();
        assert_eq!(content_only.cf_score, 0);
        assert_eq!(content_only.liked_by_similar_users, 0);
        assert_eq!(content_only.final_score, 2);
    }

    #[test]
    fn test_merge_drops_unscored_candidates() {
        let candidates = vec![candidate(1, 1, dog("Labrador", "Austin"))];
        let ranked = merge_and_rank(candidates, &HashMap::new(), &HashMap::new());
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_ranking_orders_by_score_then_recency() {
        let candidates = vec![
            candidate(1, 1, dog("Labrador", "Austin")),
            candidate(2, 5, dog("Beagle", "Dallas")),
            candidate(3, 3, dog("Poodle", "Houston")),
        ];
        let content: HashMap<i64, i64> = [(1, 1), (2, 1), (3, 2)].into();
        let ranked = merge_and_rank(candidates, &HashMap::new(), &content);
        let ids: Vec<i64> = ranked.iter().map(|c| c.listing.listing_id).collect();
        // Listing 3 wins on score; 2 beats 1 on creation time.
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_full_tie_breaks_on_ascending_listing_id() {
        // Same content score, same creation day: order must not depend on
        // input order.
        let candidates = vec![
            candidate(7, 5, dog("Labrador", "Austin")),
            candidate(3, 5, dog("Beagle", "Austin")),
            candidate(5, 5, dog("Poodle", "Austin")),
        ];
        let content: HashMap<i64, i64> = [(7, 1), (3, 1), (5, 1)].into();
        let ranked = merge_and_rank(candidates, &HashMap::new(), &content);
        let ids: Vec<i64> = ranked.iter().map(|c| c.listing.listing_id).collect();
        assert_eq!(ids, vec![3, 5, 7]);
    }

    #[test]
    fn test_no_likes_yields_no_recommendations() {
        // A user with no favorites produces no taste signal: every stage of
        // the pipeline is empty and nothing survives the merge.
        let my_likes: HashSet<i64> = HashSet::new();
        let recent = recent_likes(&[]);
        assert!(recent.is_empty());

        let overlap = similar_users(1, &[fav(2, 10), fav(3, 11)], &my_likes);
        assert!(overlap.is_empty());

        let cf = cf_signals(&overlap, &[fav(2, 20)], &my_likes);
        assert!(cf.is_empty());

        let candidates = vec![
            candidate(20, 3, dog("Poodle", "Austin")),
            candidate(21, 4, dog("Husky", "Reno")),
        ];
        let content = content_scores(&recent, &candidates);
        assert!(content.is_empty());

        assert!(merge_and_rank(candidates, &cf, &content).is_empty());
    }

    #[test]
    fn test_ranking_caps_at_max_recommendations() {
        let candidates: Vec<CandidateListing> = (1..=25)
            .map(|i| candidate(i, (i % 28) as u32 + 1, dog("Labrador", "Austin")))
            .collect();
        let content: HashMap<i64, i64> = (1..=25).map(|i| (i, 1)).collect();
        let ranked = merge_and_rank(candidates, &HashMap::new(), &content);
        assert_eq!(ranked.len(), MAX_RECOMMENDATIONS);
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let my_likes: HashSet<i64> = [10, 11].into();
        let likes = vec![
            liked(10, 1, dog("Labrador", "Austin")),
            liked(11, 2, dog("Beagle", "Dallas")),
        ];
        let co_favorites = vec![fav(2, 10), fav(2, 11), fav(3, 11)];
        let similar_favorites = vec![fav(2, 20), fav(3, 21), fav(3, 20)];
        let candidates = vec![
            candidate(20, 3, dog("Poodle", "Austin")),
            candidate(21, 4, dog("Husky", "Reno")),
        ];

        let run = || {
            let recent = recent_likes(&likes);
            let overlap = similar_users(1, &co_favorites, &my_likes);
            let cf = cf_signals(&overlap, &similar_favorites, &my_likes);
            let content = content_scores(&recent, &candidates);
            merge_and_rank(candidates.clone(), &cf, &content)
        };

        let first: Vec<(i64, i64)> = run()
            .iter()
            .map(|c| (c.listing.listing_id, c.final_score))
            .collect();
        let second: Vec<(i64, i64)> = run()
            .iter()
            .map(|c| (c.listing.listing_id, c.final_score))
            .collect();
        assert_eq!(first, second);
    }
}
