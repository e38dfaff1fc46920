//! Vote aggregation and ranking
//!
//! Reduces raw (song, rating) observations into per-song statistics and a
//! deterministic ranking. Songs are grouped by title + artist because some
//! call paths reference a song without a stable foreign key.
//!
//! Ranking order:
//! 1. Higher average rating
//! 2. Fewer one-star ratings (broader, less polarizing support wins a tie)
//! 3. More total votes
//! 4. Title, then artist, ascending
//!
//! The last two keys make the ranking fully deterministic for any input.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One user's rating of one song within a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteObservation {
    pub song_id: i64,
    pub title: String,
    pub artist: String,
    /// Rating value in 1..=5
    pub rating: i64,
}

/// Aggregated vote statistics for one song within one round
///
/// Derived on demand; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongTally {
    pub song_id: i64,
    pub title: String,
    pub artist: String,
    pub average: f64,
    pub vote_count: u32,
    pub one_star_count: u32,
}

struct TallyAccumulator {
    song_id: i64,
    rating_sum: i64,
    vote_count: u32,
    one_star_count: u32,
}

/// Aggregate observations into ranked tallies, best first
///
/// Empty input yields an empty ranking; "no votes yet" is not an error.
pub fn aggregate(observations: &[VoteObservation]) -> Vec<SongTally> {
    let mut groups: BTreeMap<(String, String), TallyAccumulator> = BTreeMap::new();

    for observation in observations {
        let key = (observation.title.clone(), observation.artist.clone());
        let entry = groups.entry(key).or_insert(TallyAccumulator {
            song_id: observation.song_id,
            rating_sum: 0,
            vote_count: 0,
            one_star_count: 0,
        });
        entry.rating_sum += observation.rating;
        entry.vote_count += 1;
        if observation.rating == 1 {
            entry.one_star_count += 1;
        }
    }

    let mut tallies: Vec<SongTally> = groups
        .into_iter()
        .map(|((title, artist), acc)| SongTally {
            song_id: acc.song_id,
            title,
            artist,
            average: acc.rating_sum as f64 / acc.vote_count as f64,
            vote_count: acc.vote_count,
            one_star_count: acc.one_star_count,
        })
        .collect();

    tallies.sort_by(compare_rank);
    tallies
}

fn compare_rank(a: &SongTally, b: &SongTally) -> Ordering {
    b.average
        .total_cmp(&a.average)
        .then_with(|| a.one_star_count.cmp(&b.one_star_count))
        .then_with(|| b.vote_count.cmp(&a.vote_count))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.artist.cmp(&b.artist))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(song_id: i64, title: &str, artist: &str, rating: i64) -> VoteObservation {
        VoteObservation {
            song_id,
            title: title.to_string(),
            artist: artist.to_string(),
            rating,
        }
    }

    #[test]
    fn empty_input_yields_empty_ranking() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn single_song_average_and_count() {
        let votes = vec![
            vote(1, "Dreams", "Fleetwood Mac", 5),
            vote(1, "Dreams", "Fleetwood Mac", 4),
            vote(1, "Dreams", "Fleetwood Mac", 3),
        ];
        let tallies = aggregate(&votes);
        assert_eq!(tallies.len(), 1);
        assert_eq!(tallies[0].vote_count, 3);
        assert_eq!(tallies[0].average, 4.0);
        assert_eq!(tallies[0].one_star_count, 0);
    }

    #[test]
    fn one_star_count_breaks_average_tie() {
        // Song A: [5, 5, 5, 1] → avg 4.0, one star
        // Song B: [4, 4] → avg 4.0, no one-stars
        let mut votes = vec![
            vote(1, "Song A", "Artist A", 5),
            vote(1, "Song A", "Artist A", 5),
            vote(1, "Song A", "Artist A", 5),
            vote(1, "Song A", "Artist A", 1),
            vote(2, "Song B", "Artist B", 4),
            vote(2, "Song B", "Artist B", 4),
        ];
        let tallies = aggregate(&votes);
        assert_eq!(tallies[0].title, "Song B");
        assert_eq!(tallies[1].title, "Song A");

        // Input order does not matter
        votes.reverse();
        let tallies = aggregate(&votes);
        assert_eq!(tallies[0].title, "Song B");
    }

    #[test]
    fn vote_count_breaks_residual_tie() {
        // Same average, same one-star count; more votes ranks first
        let votes = vec![
            vote(1, "Few", "X", 4),
            vote(2, "Many", "Y", 4),
            vote(2, "Many", "Y", 4),
            vote(2, "Many", "Y", 4),
        ];
        let tallies = aggregate(&votes);
        assert_eq!(tallies[0].title, "Many");
    }

    #[test]
    fn title_breaks_final_tie() {
        let votes = vec![vote(2, "Beta", "X", 3), vote(1, "Alpha", "X", 3)];
        let tallies = aggregate(&votes);
        assert_eq!(tallies[0].title, "Alpha");
        assert_eq!(tallies[1].title, "Beta");
    }

    #[test]
    fn lone_one_star_vote_ranks_last() {
        let votes = vec![
            vote(1, "Panned", "X", 1),
            vote(2, "Liked", "Y", 2),
        ];
        let tallies = aggregate(&votes);
        assert_eq!(tallies[1].title, "Panned");
        assert_eq!(tallies[1].average, 1.0);
        assert_eq!(tallies[1].one_star_count, 1);
    }

    #[test]
    fn higher_average_ranks_first() {
        let votes = vec![
            vote(1, "Good", "X", 3),
            vote(2, "Great", "Y", 5),
            vote(3, "Fine", "Z", 4),
        ];
        let titles: Vec<_> = aggregate(&votes).into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["Great", "Fine", "Good"]);
    }
}
