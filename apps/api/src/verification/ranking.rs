//! Activity-based verification ranking.
//!
//! A user's activity score over a trailing 30-day window (favorites count
//! all-time) decides whether they appear among the top 10 "verified" users:
//!
//!   score = 5*listings + 3*reviews + 2*appointments_done
//!           + favorites - 2*appointments_no_show
//!
//! Users with zero raw activity are excluded outright, even though a
//! no-show-heavy user could otherwise rank with a negative score.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

/// Size of the verified set.
pub const TOP_ACTIVE_LIMIT: usize = 10;
/// Length of the trailing activity window, in days.
pub const ACTIVITY_WINDOW_DAYS: i64 = 30;

/// Half-open time window `[start, end)` for the windowed signals.
#[derive(Debug, Clone, Copy)]
pub struct ActivityWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ActivityWindow {
    /// The trailing window ending now. Future-dated rows (e.g. upcoming
    /// appointments) fall outside it.
    pub fn trailing_days(days: i64) -> Self {
        let end = Utc::now();
        ActivityWindow {
            start: end - Duration::days(days),
            end,
        }
    }
}

/// Per-user raw activity counts, merged from the individual signal queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCounts {
    pub user_id: i64,
    pub listings_created: i64,
    pub reviews_left: i64,
    pub appointments_total: i64,
    pub appointments_done: i64,
    pub appointments_no_show: i64,
    pub appointments_cancelled: i64,
    pub favorites_saved: i64,
}

/// Per-user appointment tallies within the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppointmentTally {
    pub user_id: i64,
    pub total: i64,
    pub done: i64,
    pub no_show: i64,
    pub cancelled: i64,
}

pub fn activity_score(c: &ActivityCounts) -> i64 {
    c.listings_created * 5 + c.reviews_left * 3 + c.appointments_done * 2 + c.favorites_saved
        - c.appointments_no_show * 2
}

/// A user with no listings, reviews, appointments, or favorites at all is
/// never ranked, regardless of score sign.
pub fn has_any_activity(c: &ActivityCounts) -> bool {
    c.listings_created + c.reviews_left + c.appointments_total + c.favorites_saved > 0
}

/// Folds the four signal sources into one `ActivityCounts` per user.
pub fn merge_counts(
    listings: Vec<(i64, i64)>,
    reviews: Vec<(i64, i64)>,
    appointments: Vec<AppointmentTally>,
    favorites: Vec<(i64, i64)>,
) -> Vec<ActivityCounts> {
    fn slot(by_user: &mut HashMap<i64, ActivityCounts>, user_id: i64) -> &mut ActivityCounts {
        by_user.entry(user_id).or_insert_with(|| ActivityCounts {
            user_id,
            ..Default::default()
        })
    }

    let mut by_user: HashMap<i64, ActivityCounts> = HashMap::new();
    for (user_id, count) in listings {
        slot(&mut by_user, user_id).listings_created = count;
    }
    for (user_id, count) in reviews {
        slot(&mut by_user, user_id).reviews_left = count;
    }
    for tally in appointments {
        let counts = slot(&mut by_user, tally.user_id);
        counts.appointments_total = tally.total;
        counts.appointments_done = tally.done;
        counts.appointments_no_show = tally.no_show;
        counts.appointments_cancelled = tally.cancelled;
    }
    for (user_id, count) in favorites {
        slot(&mut by_user, user_id).favorites_saved = count;
    }
    by_user.into_values().collect()
}

/// Ranks users by activity score, most active first, capped at
/// [`TOP_ACTIVE_LIMIT`]. Ties resolve by ascending user id so repeated calls
/// on unchanged data return the same order.
pub fn rank_active_users(counts: &[ActivityCounts]) -> Vec<i64> {
    let mut ranked: Vec<(i64, i64)> = counts
        .iter()
        .filter(|c| has_any_activity(c))
        .map(|c| (c.user_id, activity_score(c)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(TOP_ACTIVE_LIMIT)
        .map(|(user_id, _)| user_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(user_id: i64) -> ActivityCounts {
        ActivityCounts {
            user_id,
            ..Default::default()
        }
    }

    #[test]
    fn test_score_formula() {
        // 5*2 + 3*1 + 2*3 + 5 - 2*1 = 22
        let c = ActivityCounts {
            user_id: 1,
            listings_created: 2,
            reviews_left: 1,
            appointments_total: 4,
            appointments_done: 3,
            appointments_no_show: 1,
            appointments_cancelled: 0,
            favorites_saved: 5,
        };
        assert_eq!(activity_score(&c), 22);
    }

    #[test]
    fn test_cancelled_appointments_do_not_affect_score() {
        let mut c = counts(1);
        c.appointments_total = 3;
        c.appointments_cancelled = 3;
        assert_eq!(activity_score(&c), 0);
        // ...but they do count as raw activity.
        assert!(has_any_activity(&c));
    }

    #[test]
    fn test_zero_activity_users_excluded() {
        let mut active = counts(1);
        active.favorites_saved = 1;
        let idle = counts(2);
        assert_eq!(rank_active_users(&[active, idle]), vec![1]);
    }

    #[test]
    fn test_negative_score_still_ranked_when_active() {
        // Only no-shows: negative score, but raw activity is non-zero.
        let mut c = counts(1);
        c.appointments_total = 2;
        c.appointments_no_show = 2;
        assert_eq!(activity_score(&c), -4);
        assert_eq!(rank_active_users(&[c]), vec![1]);
    }

    #[test]
    fn test_ranking_caps_at_ten() {
        let many: Vec<ActivityCounts> = (1..=15)
            .map(|user_id| {
                let mut c = counts(user_id);
                c.listings_created = user_id;
                c
            })
            .collect();
        let ranked = rank_active_users(&many);
        assert_eq!(ranked.len(), TOP_ACTIVE_LIMIT);
        // Most listings first.
        assert_eq!(ranked[0], 15);
    }

    #[test]
    fn test_ties_resolve_by_ascending_user_id() {
        let mut a = counts(7);
        a.reviews_left = 2;
        let mut b = counts(3);
        b.reviews_left = 2;
        assert_eq!(rank_active_users(&[a, b]), vec![3, 7]);
    }

    #[test]
    fn test_merge_combines_all_sources() {
        let merged = merge_counts(
            vec![(1, 2)],
            vec![(1, 1), (2, 4)],
            vec![AppointmentTally {
                user_id: 1,
                total: 4,
                done: 3,
                no_show: 1,
                cancelled: 0,
            }],
            vec![(1, 5)],
        );
        let user1 = merged.iter().find(|c| c.user_id == 1).unwrap();
        assert_eq!(activity_score(user1), 22);
        let user2 = merged.iter().find(|c| c.user_id == 2).unwrap();
        assert_eq!(user2.reviews_left, 4);
        assert_eq!(user2.listings_created, 0);
    }

    #[test]
    fn test_window_is_trailing() {
        let window = ActivityWindow::trailing_days(ACTIVITY_WINDOW_DAYS);
        assert_eq!(window.end - window.start, Duration::days(30));
        assert!(window.end <= Utc::now());
    }
}
