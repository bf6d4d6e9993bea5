use super::types::{Move, RoundOutcome};

impl Move {
    /// The move this one defeats.
    pub fn beats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    /// The unique move that defeats this one.
    pub fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }
}

/// Classify a round from the player's point of view.
pub fn resolve_round(player: Move, opponent: Move) -> RoundOutcome {
    if player == opponent {
        RoundOutcome::Draw
    } else if player.beats() == opponent {
        RoundOutcome::Win
    } else {
        RoundOutcome::Lose
    }
}
