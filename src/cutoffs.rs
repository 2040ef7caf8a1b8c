//! Percentile rank cutoffs.
//!
//! Ranks are assigned by percentile of the global leaderboard. Given one
//! snapshot, [`compute_cutoffs`] returns the contiguous rating band each rank
//! label covers, best rank first.
//!
//! # Example
//!
//! ```rust
//! use tetrio_api_client::cutoffs::{compute_cutoffs, rank_for_rating};
//! use tetrio_api_client::types::LeagueUser;
//!
//! let users: Vec<LeagueUser> = (0..100)
//!     .map(|i| {
//!         serde_json::from_value(serde_json::json!({
//!             "_id": format!("{i}"),
//!             "username": format!("user{i}"),
//!             "league": {"rating": 25000.0 - f64::from(i) * 100.0}
//!         }))
//!         .unwrap()
//!     })
//!     .collect();
//!
//! let bands = compute_cutoffs(&users).unwrap();
//! assert_eq!(bands[0].rank, "x");
//! assert!(bands[0].includes(25000.0));
//! assert_eq!(rank_for_rating(&bands, 25000.0).unwrap().rank, "x");
//! ```

use crate::error::TetrioError;
use crate::types::LeagueUser;

/// Rank labels with the fraction of the leaderboard at or above their floor.
pub const RANK_TABLE: [(&str, f64); 17] = [
    ("x", 0.01),
    ("u", 0.05),
    ("ss", 0.11),
    ("s+", 0.17),
    ("s", 0.23),
    ("s-", 0.30),
    ("a+", 0.38),
    ("a", 0.46),
    ("a-", 0.54),
    ("b+", 0.62),
    ("b", 0.70),
    ("b-", 0.78),
    ("c+", 0.84),
    ("c", 0.90),
    ("c-", 0.95),
    ("d+", 0.975),
    ("d", 1.00),
];

/// The rating band of one rank, bounded by two entries of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankRange<'a> {
    /// Rank label.
    pub rank: &'static str,
    /// Fraction of the leaderboard at or above `bottom`.
    pub percentile: f64,
    /// Highest rated entry of the band.
    pub top: &'a LeagueUser,
    /// Entry just below the band (the band's own floor for the last rank).
    pub bottom: &'a LeagueUser,
    closed_top: bool,
    closed_bottom: bool,
}

impl RankRange<'_> {
    /// Check if `rating` falls in `(bottom, top]`.
    ///
    /// The first band always contains its top and the last band its bottom,
    /// so the highest and lowest rated entries belong somewhere even when a
    /// small leaderboard collapses a band onto a single entry.
    pub fn includes(&self, rating: f64) -> bool {
        let top = self.top.league.rating;
        let bottom = self.bottom.league.rating;
        if self.closed_top && rating == top {
            return true;
        }
        top >= rating && (rating > bottom || (self.closed_bottom && rating == bottom))
    }

    /// Rating of the top boundary entry.
    pub fn top_rating(&self) -> f64 {
        self.top.league.rating
    }

    /// Rating of the bottom boundary entry.
    pub fn bottom_rating(&self) -> f64 {
        self.bottom.league.rating
    }
}

/// Compute the rank bands of a leaderboard ordered by rating, best first.
///
/// Band `i` ends at entry `floor((n - 1) * percentile[i])`, which is also
/// where band `i + 1` starts. The first band always starts at the #1 entry
/// and the last always ends at the lowest rated one.
pub fn compute_cutoffs(users: &[LeagueUser]) -> Result<Vec<RankRange<'_>>, TetrioError> {
    let (Some(first), Some(last)) = (users.first(), users.last()) else {
        return Err(TetrioError::InsufficientData);
    };

    if let Some(index) = users
        .windows(2)
        .position(|pair| pair[0].league.rating < pair[1].league.rating)
    {
        return Err(TetrioError::UnorderedSnapshot { index: index + 1 });
    }

    let max_index = (users.len() - 1) as f64;
    let last_band = RANK_TABLE.len() - 1;
    let mut bands = Vec::with_capacity(RANK_TABLE.len());
    let mut top = first;

    for (i, &(rank, percentile)) in RANK_TABLE.iter().enumerate() {
        let bottom = if i == last_band {
            last
        } else {
            &users[(max_index * percentile) as usize]
        };
        bands.push(RankRange {
            rank,
            percentile,
            top,
            bottom,
            closed_top: i == 0,
            closed_bottom: i == last_band,
        });
        top = bottom;
    }

    Ok(bands)
}

/// Find the band containing `rating`.
pub fn rank_for_rating<'s, 'a>(bands: &'s [RankRange<'a>], rating: f64) -> Option<&'s RankRange<'a>> {
    bands.iter().find(|band| band.includes(rating))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaderboard(ratings: impl IntoIterator<Item = f64>) -> Vec<LeagueUser> {
        ratings
            .into_iter()
            .enumerate()
            .map(|(i, rating)| {
                serde_json::from_value(json!({
                    "_id": format!("{i:024x}"),
                    "username": format!("user{i}"),
                    "league": {"rating": rating, "standing": i + 1}
                }))
                .unwrap()
            })
            .collect()
    }

    fn descending(n: usize) -> Vec<LeagueUser> {
        leaderboard((0..n).map(|i| 25_000.0 - i as f64 * 7.5))
    }

    #[test]
    fn test_empty_snapshot_is_insufficient() {
        assert!(matches!(
            compute_cutoffs(&[]),
            Err(TetrioError::InsufficientData)
        ));
    }

    #[test]
    fn test_bands_are_contiguous_with_forced_extremes() {
        for n in [1, 2, 5, 17, 100, 1_234] {
            let users = descending(n);
            let bands = compute_cutoffs(&users).unwrap();

            assert_eq!(bands.len(), RANK_TABLE.len());
            assert!(std::ptr::eq(bands[0].top, &users[0]));
            assert!(std::ptr::eq(bands[bands.len() - 1].bottom, &users[n - 1]));
            for pair in bands.windows(2) {
                assert!(std::ptr::eq(pair[0].bottom, pair[1].top));
            }
            for band in &bands {
                assert!(band.top_rating() >= band.bottom_rating());
            }
        }
    }

    #[test]
    fn test_boundary_indices_follow_percentiles() {
        let users = descending(1_001);
        let bands = compute_cutoffs(&users).unwrap();

        assert_eq!(bands[0].bottom.league.standing, 11);
        assert_eq!(bands[1].bottom.league.standing, 51);
        assert_eq!(bands[15].bottom.league.standing, 976);
        assert_eq!(bands[16].bottom.league.standing, 1_001);
    }

    #[test]
    fn test_every_rating_is_in_exactly_one_band() {
        let users = descending(1_000);
        let bands = compute_cutoffs(&users).unwrap();

        for user in &users {
            let matching: Vec<&str> = bands
                .iter()
                .filter(|band| band.includes(user.rating()))
                .map(|band| band.rank)
                .collect();
            assert_eq!(matching.len(), 1, "rating {} in {:?}", user.rating(), matching);
        }

        let max = users[0].rating();
        let min = users[users.len() - 1].rating();
        assert_eq!(rank_for_rating(&bands, max).unwrap().rank, "x");
        assert_eq!(rank_for_rating(&bands, min).unwrap().rank, "d");
        assert!(rank_for_rating(&bands, max + 1.0).is_none());
    }

    #[test]
    fn test_small_leaderboards_keep_extremes_in_outer_bands() {
        for n in [1, 2, 5, 100] {
            let users = descending(n);
            let bands = compute_cutoffs(&users).unwrap();

            let max = users[0].rating();
            let min = users[n - 1].rating();
            assert!(bands[0].includes(max), "n = {n}");
            assert!(bands[bands.len() - 1].includes(min), "n = {n}");
            assert_eq!(rank_for_rating(&bands, max).unwrap().rank, "x", "n = {n}");
            if n > 1 {
                assert_eq!(rank_for_rating(&bands, min).unwrap().rank, "d", "n = {n}");
            }
            for user in &users {
                assert!(rank_for_rating(&bands, user.rating()).is_some(), "n = {n}");
            }
        }
    }

    #[test]
    fn test_out_of_order_snapshot_is_rejected() {
        let users = leaderboard([300.0, 200.0, 250.0, 100.0]);
        assert!(matches!(
            compute_cutoffs(&users),
            Err(TetrioError::UnorderedSnapshot { index: 2 })
        ));
    }

    #[test]
    fn test_ties_are_accepted() {
        let users = leaderboard([300.0, 300.0, 200.0, 200.0]);
        assert!(compute_cutoffs(&users).is_ok());
    }
}
