use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

// Simple card representation for the table engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: u8, // 2-14 (Jack=11, Queen=12, King=13, Ace=14)
    pub suit: u8, // 0-3 (Clubs, Diamonds, Hearts, Spades)
}

impl Card {
    pub fn new(rank: u8, suit: u8) -> Self {
        Self { rank, suit }
    }

    /// Converts to rs_poker's card type for hand evaluation.
    pub fn to_rs_poker(&self) -> rs_poker::core::Card {
        use rs_poker::core::{Suit, Value};

        let value = match self.rank {
            2 => Value::Two,
            3 => Value::Three,
            4 => Value::Four,
            5 => Value::Five,
            6 => Value::Six,
            7 => Value::Seven,
            8 => Value::Eight,
            9 => Value::Nine,
            10 => Value::Ten,
            11 => Value::Jack,
            12 => Value::Queen,
            13 => Value::King,
            14 => Value::Ace,
            _ => Value::Two,
        };
        let suit = match self.suit {
            0 => Suit::Club,
            1 => Suit::Diamond,
            2 => Suit::Heart,
            _ => Suit::Spade,
        };
        rs_poker::core::Card { value, suit }
    }

    fn suit_char(suit: u8) -> char {
        match suit {
            0 => '♣',
            1 => '♦',
            2 => '♥',
            3 => '♠',
            _ => '?',
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank_str = match self.rank {
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            14 => "A".to_string(),
            n => n.to_string(),
        };
        write!(f, "{}{}", rank_str, Self::suit_char(self.suit))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Creates a new standard 52-card deck
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(52);

        // 4 suits: Clubs=0, Diamonds=1, Hearts=2, Spades=3
        // 13 ranks: 2-10, Jack=11, Queen=12, King=13, Ace=14
        for suit in 0..4 {
            for rank in 2..=14 {
                cards.push(Card::new(rank, suit));
            }
        }

        Self { cards }
    }

    /// Shuffles the deck using Fisher-Yates with a ChaCha20 RNG
    pub fn shuffle(&mut self) {
        let mut rng = ChaCha20Rng::from_entropy();
        self.cards.shuffle(&mut rng);
    }

    /// Deals a single card from the deck
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deals multiple cards from the deck
    pub fn deal_multiple(&mut self, count: usize) -> Vec<Card> {
        let mut dealt = Vec::new();
        for _ in 0..count {
            if let Some(card) = self.deal() {
                dealt.push(card);
            }
        }
        dealt
    }

    /// Returns the number of remaining cards
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Resets the deck to a full 52-card deck and shuffles
    pub fn reset_and_shuffle(&mut self) {
        *self = Self::new();
        self.shuffle();
    }
}
