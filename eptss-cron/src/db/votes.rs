//! Vote queries

use eptss_common::db::VoteRow;
use eptss_common::Result;
use eptss_engine::VoteObservation;
use sqlx::SqlitePool;

/// Fetch all vote observations for a round, joined with song identity
///
/// Raw rows only; grouping and ranking happen in the engine's aggregator.
pub async fn get_vote_observations(pool: &SqlitePool, round_id: i64) -> Result<Vec<VoteObservation>> {
    let rows = sqlx::query_as::<_, VoteRow>(
        "SELECT v.song_id, s.title, s.artist, v.vote \
         FROM song_selection_votes v \
         JOIN songs s ON s.id = v.song_id \
         WHERE v.round_id = $1",
    )
    .bind(round_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| VoteObservation {
            song_id: row.song_id,
            title: row.title,
            artist: row.artist,
            rating: row.vote,
        })
        .collect())
}
