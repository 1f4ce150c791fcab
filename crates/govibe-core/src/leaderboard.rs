//! Challenge leaderboard ordering.

use serde::Serialize;

use crate::api::Participant;

/// One displayed leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub name: String,
    pub email: String,
    pub repetitions: u32,
    pub participated_at: String,
}

/// Sort participations by repetitions, highest first.
pub fn rank(mut participants: Vec<Participant>) -> Vec<Participant> {
    participants.sort_by(|a, b| b.repetitions.cmp(&a.repetitions));
    participants
}

/// Ranked rows; tied scores share a rank (9, 9, 3 rank as 1, 1, 3).
pub fn rows(participants: Vec<Participant>) -> Vec<LeaderboardRow> {
    let ranked = rank(participants);
    let mut rows: Vec<LeaderboardRow> = Vec::with_capacity(ranked.len());
    for (i, p) in ranked.into_iter().enumerate() {
        let rank = match rows.last() {
            Some(prev) if prev.repetitions == p.repetitions => prev.rank,
            _ => i + 1,
        };
        rows.push(LeaderboardRow {
            rank,
            name: format!("{} {}", p.user.last_name, p.user.first_name),
            email: p.user.email,
            repetitions: p.repetitions,
            participated_at: p.participated_at,
        });
    }
    rows
}
