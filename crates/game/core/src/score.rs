//! Per-team kill counters.

use std::collections::BTreeMap;

use crate::env::ScoreSink;
use crate::state::TeamId;

/// Score per team. Teams appear on their first increment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamScoreTable {
    scores: BTreeMap<TeamId, i32>,
}

impl TeamScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one point to `team`, starting from zero if the team is new.
    pub fn increment_score(&mut self, team: TeamId) -> i32 {
        let score = self.scores.get(&team).copied().unwrap_or(0) + 1;
        self.scores.insert(team, score);
        score
    }

    /// Current score of `team` (0 if it never scored).
    pub fn score(&self, team: TeamId) -> i32 {
        self.scores.get(&team).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TeamId, i32)> + '_ {
        self.scores.iter().map(|(&team, &score)| (team, score))
    }
}

impl ScoreSink for TeamScoreTable {
    fn increment_score(&mut self, team: TeamId) {
        TeamScoreTable::increment_score(self, team);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_are_independent_per_team() {
        let mut table = TeamScoreTable::new();
        for _ in 0..3 {
            table.increment_score(TeamId(5));
        }
        table.increment_score(TeamId(7));

        assert_eq!(table.score(TeamId(5)), 3);
        assert_eq!(table.score(TeamId(7)), 1);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![(TeamId(5), 3), (TeamId(7), 1)]
        );
    }

    #[test]
    fn unknown_team_scores_zero_without_creating_entry() {
        let table = TeamScoreTable::new();
        assert_eq!(table.score(TeamId(3)), 0);
        assert!(table.is_empty());
    }
}
