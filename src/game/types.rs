use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Maximum number of rounds kept in the history list.
pub const HISTORY_LEN: usize = 5;

/// One of the three hand shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Lowercase identifier, also used as the Fluent message suffix.
    pub fn key(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rock" | "r" => Ok(Move::Rock),
            "paper" | "p" => Ok(Move::Paper),
            "scissors" | "s" => Ok(Move::Scissors),
            other => Err(ParseError::UnknownMove(other.to_string())),
        }
    }
}

/// Outcome of a round from the human player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Win,
    Lose,
    Draw,
}

impl RoundOutcome {
    pub fn key(self) -> &'static str {
        match self {
            RoundOutcome::Win => "win",
            RoundOutcome::Lose => "lose",
            RoundOutcome::Draw => "draw",
        }
    }
}

/// A resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub player: Move,
    pub computer: Move,
    pub outcome: RoundOutcome,
}

/// Session statistics. Draws and win rate are derived, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub rounds: u32,
    pub player_wins: u32,
    pub computer_wins: u32,
    /// Consecutive player wins, reset on any non-win.
    pub streak: u32,
    /// Most recent first, at most [`HISTORY_LEN`] entries.
    pub history: Vec<Round>,
}

impl Statistics {
    /// Fold one resolved round into the statistics.
    #[must_use]
    pub fn record(mut self, round: Round) -> Self {
        self.rounds += 1;
        match round.outcome {
            RoundOutcome::Win => {
                self.player_wins += 1;
                self.streak += 1;
            }
            RoundOutcome::Lose => {
                self.computer_wins += 1;
                self.streak = 0;
            }
            RoundOutcome::Draw => self.streak = 0,
        }
        self.history.insert(0, round);
        self.history.truncate(HISTORY_LEN);
        self
    }

    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn draws(&self) -> u32 {
        self.rounds
            .saturating_sub(self.player_wins)
            .saturating_sub(self.computer_wins)
    }

    /// Win percentage, `None` before the first round.
    pub fn win_rate(&self) -> Option<f64> {
        if self.rounds == 0 {
            None
        } else {
            Some(self.player_wins as f64 / self.rounds as f64 * 100.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown move '{0}' (expected rock, paper or scissors)")]
    UnknownMove(String),
    #[error("unknown difficulty '{0}' (expected beginner, intermediate, advanced or expert)")]
    UnknownDifficulty(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(outcome: RoundOutcome) -> Round {
        Round {
            player: Move::Rock,
            computer: Move::Scissors,
            outcome,
        }
    }

    #[test]
    fn parses_moves_and_shorthands() {
        assert_eq!("rock".parse::<Move>(), Ok(Move::Rock));
        assert_eq!(" P ".parse::<Move>(), Ok(Move::Paper));
        assert_eq!("Scissors".parse::<Move>(), Ok(Move::Scissors));
        assert_eq!(
            "lizard".parse::<Move>(),
            Err(ParseError::UnknownMove("lizard".into()))
        );
    }

    #[test]
    fn streak_counts_consecutive_wins_only() {
        let stats = Statistics::default()
            .record(round(RoundOutcome::Win))
            .record(round(RoundOutcome::Win));
        assert_eq!(stats.streak, 2);

        let stats = stats.record(round(RoundOutcome::Draw));
        assert_eq!(stats.streak, 0);

        let stats = stats
            .record(round(RoundOutcome::Win))
            .record(round(RoundOutcome::Lose));
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.rounds, 5);
        assert_eq!(stats.player_wins, 3);
        assert_eq!(stats.computer_wins, 1);
        assert_eq!(stats.draws(), 1);
    }

    #[test]
    fn history_keeps_five_most_recent_first() {
        let mut stats = Statistics::default();
        for computer in [
            Move::Rock,
            Move::Paper,
            Move::Scissors,
            Move::Rock,
            Move::Paper,
            Move::Scissors,
            Move::Rock,
        ] {
            stats = stats.record(Round {
                player: Move::Paper,
                computer,
                outcome: RoundOutcome::Draw,
            });
        }
        assert_eq!(stats.history.len(), HISTORY_LEN);
        assert_eq!(stats.history[0].computer, Move::Rock);
        assert_eq!(stats.history[1].computer, Move::Scissors);
        assert_eq!(stats.history[4].computer, Move::Scissors);
    }

    #[test]
    fn win_rate_is_derived() {
        assert_eq!(Statistics::default().win_rate(), None);
        let stats = Statistics::default()
            .record(round(RoundOutcome::Win))
            .record(round(RoundOutcome::Lose))
            .record(round(RoundOutcome::Lose))
            .record(round(RoundOutcome::Draw));
        assert_eq!(stats.win_rate(), Some(25.0));
    }

    #[test]
    fn draws_never_underflow() {
        let stats = Statistics {
            rounds: 1,
            player_wins: 1,
            computer_wins: 1,
            ..Statistics::default()
        };
        assert_eq!(stats.draws(), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let stats = Statistics::default().record(round(RoundOutcome::Win));
        assert_eq!(stats.reset(), Statistics::default());
    }
}
