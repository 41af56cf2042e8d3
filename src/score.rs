use crate::entity::Player;
use std::fmt;

/// Score tracking for both players
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    pub player1: u32,
    pub player2: u32,
    pub winning_score: u32,
}

impl ScoreBoard {
    pub fn new(winning_score: u32) -> Self {
        Self {
            player1: 0,
            player2: 0,
            winning_score,
        }
    }

    pub fn player1_scores(&mut self) {
        self.player1 += 1;
    }

    pub fn player2_scores(&mut self) {
        self.player2 += 1;
    }

    pub fn award(&mut self, player: Player) {
        match player {
            Player::One => self.player1_scores(),
            Player::Two => self.player2_scores(),
        }
    }

    pub fn reset(&mut self) {
        self.player1 = 0;
        self.player2 = 0;
    }

    pub fn score(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    pub fn total(&self) -> u32 {
        self.player1 + self.player2
    }

    pub fn winner(&self) -> Option<Player> {
        if self.player1 >= self.winning_score {
            Some(Player::One)
        } else if self.player2 >= self.winning_score {
            Some(Player::Two)
        } else {
            None
        }
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new(crate::config::Params::WINNING_SCORE)
    }
}

impl fmt::Display for ScoreBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player 1: {}  Player 2: {}", self.player1, self.player2)
    }
}
