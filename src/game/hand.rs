//! Hand strength evaluation over the cards available at showdown.
//!
//! The 5-card ranking itself is rs_poker's; this module picks the best
//! five of the available cards and wraps the result in an ordered type
//! the payout code can compare directly.

use crate::game::deck::Card;
use rs_poker::core::{Hand, Rank as RsRank, Rankable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandCategory {
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::Pair => "Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

/// Fully ordered strength of a best five-card hand: category first,
/// then rs_poker's sub-rank within the category (kickers and all).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandRank {
    pub category: HandCategory,
    sub_rank: u32,
}

impl HandRank {
    fn from_rs(rank: RsRank) -> Self {
        let (category, sub_rank) = match rank {
            RsRank::HighCard(v) => (HandCategory::HighCard, v),
            RsRank::OnePair(v) => (HandCategory::Pair, v),
            RsRank::TwoPair(v) => (HandCategory::TwoPair, v),
            RsRank::ThreeOfAKind(v) => (HandCategory::ThreeOfAKind, v),
            RsRank::Straight(v) => (HandCategory::Straight, v),
            RsRank::Flush(v) => (HandCategory::Flush, v),
            RsRank::FullHouse(v) => (HandCategory::FullHouse, v),
            RsRank::FourOfAKind(v) => (HandCategory::FourOfAKind, v),
            RsRank::StraightFlush(v) => (HandCategory::StraightFlush, v),
        };
        Self { category, sub_rank }
    }
}

/// Evaluate the best five-card hand from `hole` + `board` (any total of
/// five to seven cards).
pub fn evaluate_hand(hole: &[Card], board: &[Card]) -> HandRank {
    let mut cards: Vec<Card> = Vec::with_capacity(hole.len() + board.len());
    cards.extend_from_slice(hole);
    cards.extend_from_slice(board);

    let best = combinations(&cards, 5)
        .into_iter()
        .map(|five| {
            let rs_cards: Vec<rs_poker::core::Card> =
                five.iter().map(|c| c.to_rs_poker()).collect();
            Hand::new_with_cards(rs_cards).rank()
        })
        .max()
        .expect("should have at least one 5-card combination");
    HandRank::from_rs(best)
}

/// Indices (the `usize` tags) of the winners: the holders of the
/// highest-ranked hand, all of them on an exact tie.
pub fn determine_winners(hands: &[(usize, HandRank)]) -> Vec<usize> {
    let best = match hands.iter().map(|(_, r)| *r).max() {
        Some(rank) => rank,
        None => return vec![],
    };
    hands
        .iter()
        .filter(|(_, r)| *r == best)
        .map(|(i, _)| *i)
        .collect()
}

/// All k-element combinations of `cards`, preserving input order.
fn combinations(cards: &[Card], k: usize) -> Vec<Vec<Card>> {
    let mut result = Vec::new();
    let mut current = Vec::with_capacity(k);
    combine(cards, k, 0, &mut current, &mut result);
    result
}

fn combine(
    cards: &[Card],
    k: usize,
    start: usize,
    current: &mut Vec<Card>,
    result: &mut Vec<Vec<Card>>,
) {
    if current.len() == k {
        result.push(current.clone());
        return;
    }
    for i in start..cards.len() {
        current.push(cards[i]);
        combine(cards, k, i + 1, current, result);
        current.pop();
    }
}
