use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::game::types::{Move, ParseError};

/// Display metadata plus the chance of deliberately countering the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Fluent id of the display name.
    pub name_key: &'static str,
    /// Fluent id of the description.
    pub desc_key: &'static str,
    /// Probability in [0, 1] of answering with the counter-move.
    pub counter_probability: f64,
}

/// The four difficulty presets, from fully random to heavily biased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

const PROFILES: [DifficultyProfile; 4] = [
    DifficultyProfile {
        name_key: "difficulty-beginner",
        desc_key: "difficulty-beginner-desc",
        counter_probability: 0.0,
    },
    DifficultyProfile {
        name_key: "difficulty-intermediate",
        desc_key: "difficulty-intermediate-desc",
        counter_probability: 0.4,
    },
    DifficultyProfile {
        name_key: "difficulty-advanced",
        desc_key: "difficulty-advanced-desc",
        counter_probability: 0.7,
    },
    DifficultyProfile {
        name_key: "difficulty-expert",
        desc_key: "difficulty-expert-desc",
        counter_probability: 0.9,
    },
];

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Expert,
    ];

    pub fn profile(self) -> &'static DifficultyProfile {
        &PROFILES[self.index()]
    }

    /// Position in [`Difficulty::ALL`], used by the drop-down.
    pub fn index(self) -> usize {
        match self {
            Difficulty::Beginner => 0,
            Difficulty::Intermediate => 1,
            Difficulty::Advanced => 2,
            Difficulty::Expert => 3,
        }
    }

    #[cfg_attr(not(feature = "gui"), allow(dead_code))]
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.key() == wanted)
            .ok_or(ParseError::UnknownDifficulty(wanted))
    }
}

/// Pick the computer's move. With probability `counter_probability` it plays
/// the counter to `player`; otherwise any of the three moves uniformly,
/// which may still happen to be the counter.
pub fn choose_opponent_move<R: Rng + ?Sized>(
    player: Move,
    difficulty: &DifficultyProfile,
    rng: &mut R,
) -> Move {
    if rng.gen::<f64>() < difficulty.counter_probability {
        return player.counter();
    }
    Move::ALL[rng.gen_range(0..Move::ALL.len())]
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game::rules::resolve_round;
    use crate::game::types::RoundOutcome;

    fn with_probability(p: f64) -> DifficultyProfile {
        DifficultyProfile {
            name_key: "difficulty-custom",
            desc_key: "difficulty-custom-desc",
            counter_probability: p,
        }
    }

    #[test]
    fn preset_probabilities() {
        let probs: Vec<f64> = Difficulty::ALL
            .iter()
            .map(|d| d.profile().counter_probability)
            .collect();
        assert_eq!(probs, vec![0.0, 0.4, 0.7, 0.9]);
        assert_eq!(Difficulty::default(), Difficulty::Intermediate);
    }

    #[test]
    fn parses_difficulty_keys() {
        for d in Difficulty::ALL {
            assert_eq!(d.key().parse::<Difficulty>(), Ok(d));
            assert_eq!(Difficulty::from_index(d.index()), Some(d));
        }
        assert_eq!("EXPERT".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert!("godlike".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::from_index(4), None);
    }

    #[test]
    fn certain_counter_always_beats_player() {
        let mut rng = StdRng::seed_from_u64(7);
        let always = with_probability(1.0);
        for player in Move::ALL {
            for _ in 0..200 {
                let computer = choose_opponent_move(player, &always, &mut rng);
                assert_eq!(computer, player.counter());
                assert_eq!(resolve_round(player, computer), RoundOutcome::Lose);
            }
        }
        assert_eq!(
            choose_opponent_move(Move::Rock, &always, &mut rng),
            Move::Paper
        );
    }

    #[test]
    fn zero_probability_is_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let never = with_probability(0.0);
        let mut counts = [0u32; 3];
        let samples = 10_000;
        for _ in 0..samples {
            let m = choose_opponent_move(Move::Rock, &never, &mut rng);
            counts[Move::ALL.iter().position(|&x| x == m).unwrap()] += 1;
        }
        for count in counts {
            let share = count as f64 / samples as f64;
            assert!((share - 1.0 / 3.0).abs() < 0.03, "share {share}");
        }
    }

    #[test]
    fn expert_counters_more_often_than_beginner() {
        let mut rng = StdRng::seed_from_u64(3);
        let counters = |d: Difficulty, rng: &mut StdRng| {
            (0..5_000)
                .filter(|_| choose_opponent_move(Move::Scissors, d.profile(), rng) == Move::Rock)
                .count()
        };
        let beginner = counters(Difficulty::Beginner, &mut rng);
        let expert = counters(Difficulty::Expert, &mut rng);
        // Expected shares are 1/3 and 0.9 + 0.1/3.
        assert!(beginner < 2_000, "beginner {beginner}");
        assert!(expert > 4_400, "expert {expert}");
    }
}
