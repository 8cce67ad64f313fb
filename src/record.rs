//! Match record
//!
//! Win/loss/tie tally plus the most recent results, persisted to LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::sim::{EndReason, GameState, Outcome};

/// Maximum number of past results to keep
pub const MAX_HISTORY: usize = 10;

/// A finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub outcome: Outcome,
    pub reason: EndReason,
    pub player_health: u32,
    pub enemy_health: u32,
    /// Seconds left on the timer when it ended
    pub seconds_left: u32,
    /// Unix timestamp (ms)
    pub timestamp: f64,
}

impl MatchEntry {
    /// Build an entry from a decided round
    pub fn from_state(state: &GameState, timestamp: f64) -> Option<Self> {
        let result = state.result?;
        Some(Self {
            outcome: result.outcome,
            reason: result.reason,
            player_health: state.player.health,
            enemy_health: state.enemy.health,
            seconds_left: state.seconds_left(),
            timestamp,
        })
    }
}

/// Running tally across rounds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player_wins: u32,
    pub enemy_wins: u32,
    pub ties: u32,
    /// Newest first
    pub history: Vec<MatchEntry>,
}

impl MatchRecord {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "rect_fighter_record";

    pub fn new() -> Self {
        Self::default()
    }

    /// Count a result and push it onto the history
    pub fn record(&mut self, entry: MatchEntry) {
        match entry.outcome {
            Outcome::PlayerWins => self.player_wins += 1,
            Outcome::EnemyWins => self.enemy_wins += 1,
            Outcome::Tie => self.ties += 1,
        }
        self.history.insert(0, entry);
        self.history.truncate(MAX_HISTORY);
    }

    pub fn total(&self) -> u32 {
        self.player_wins + self.enemy_wins + self.ties
    }

    /// Current run of identical outcomes, newest first
    pub fn streak(&self) -> Option<(Outcome, usize)> {
        let latest = self.history.first()?.outcome;
        let len = self
            .history
            .iter()
            .take_while(|e| e.outcome == latest)
            .count();
        Some((latest, len))
    }

    /// Scoreline for the HUD, with the current streak once it reaches two
    pub fn summary(&self) -> String {
        let mut line = format!("{} - {}", self.player_wins, self.enemy_wins);
        if self.ties > 0 {
            line.push_str(&format!(" ({} tied)", self.ties));
        }
        if let Some((outcome, len)) = self.streak().filter(|&(_, len)| len >= 2) {
            line.push_str(&format!(", {outcome} x{len}"));
        }
        line
    }

    pub fn load() -> Self {
        match persistence::load::<MatchRecord>(Self::STORAGE_KEY) {
            Some(record) => {
                log::info!("Loaded record of {} rounds", record.total());
                record
            }
            None => Self::new(),
        }
    }

    pub fn save(&self) {
        if persistence::save(Self::STORAGE_KEY, self) {
            log::info!("Record saved ({} rounds)", self.total());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RoundResult;

    fn entry(outcome: Outcome) -> MatchEntry {
        MatchEntry {
            outcome,
            reason: EndReason::KnockOut,
            player_health: 0,
            enemy_health: 0,
            seconds_left: 30,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_tally() {
        let mut record = MatchRecord::new();
        record.record(entry(Outcome::PlayerWins));
        record.record(entry(Outcome::PlayerWins));
        record.record(entry(Outcome::EnemyWins));
        record.record(entry(Outcome::Tie));
        assert_eq!(record.player_wins, 2);
        assert_eq!(record.enemy_wins, 1);
        assert_eq!(record.ties, 1);
        assert_eq!(record.total(), 4);
        assert_eq!(record.summary(), "2 - 1 (1 tied)");
    }

    #[test]
    fn test_history_is_bounded_newest_first() {
        let mut record = MatchRecord::new();
        for i in 0..(MAX_HISTORY + 5) {
            let mut e = entry(Outcome::EnemyWins);
            e.timestamp = i as f64;
            record.record(e);
        }
        assert_eq!(record.history.len(), MAX_HISTORY);
        assert_eq!(record.history[0].timestamp, (MAX_HISTORY + 4) as f64);
        // Tally keeps counting past the history window
        assert_eq!(record.enemy_wins, (MAX_HISTORY + 5) as u32);
    }

    #[test]
    fn test_streak() {
        let mut record = MatchRecord::new();
        assert_eq!(record.streak(), None);
        record.record(entry(Outcome::EnemyWins));
        record.record(entry(Outcome::PlayerWins));
        record.record(entry(Outcome::PlayerWins));
        assert_eq!(record.streak(), Some((Outcome::PlayerWins, 2)));
        assert_eq!(record.summary(), "2 - 1, Player 1 Wins x2");

        record.record(entry(Outcome::Tie));
        assert_eq!(record.streak(), Some((Outcome::Tie, 1)));
        assert_eq!(record.summary(), "2 - 1 (1 tied)");
    }

    #[test]
    fn test_entry_from_state() {
        let mut state = GameState::new(1, 60);
        assert!(MatchEntry::from_state(&state, 0.0).is_none());

        state.enemy.health = 40;
        state.ticks_left = 60 * 12;
        state.result = Some(RoundResult {
            outcome: Outcome::PlayerWins,
            reason: EndReason::TimeUp,
        });
        let entry = MatchEntry::from_state(&state, 5.0).unwrap();
        assert_eq!(entry.enemy_health, 40);
        assert_eq!(entry.seconds_left, 12);
        assert_eq!(entry.reason, EndReason::TimeUp);
    }
}
