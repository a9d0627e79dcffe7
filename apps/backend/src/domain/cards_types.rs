//! Core card-related types: Suit, CardId, Card, PlayedCard

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::state::PlayerId;

pub const ACE: u8 = 1;
pub const KING: u8 = 13;

/// Prefix used for placeholder ids in personalized views.
pub const HIDDEN_PREFIX: &str = "hidden-";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Fixed suit hierarchy: hearts > diamonds > clubs > spades.
    pub const fn power(self) -> u8 {
        match self {
            Suit::Hearts => 4,
            Suit::Diamonds => 3,
            Suit::Clubs => 2,
            Suit::Spades => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

/// Opaque card identity, `"{suit}-{rank}-{deck}"` for real cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(suit: Suit, rank: u8, deck: usize) -> Self {
        Self(format!("{}-{rank}-{deck}", suit.as_str()))
    }

    pub fn hidden(index: usize) -> Self {
        Self(format!("{HIDDEN_PREFIX}{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hand position encoded in a placeholder id, if this is one.
    pub fn hidden_index(&self) -> Option<usize> {
        self.0.strip_prefix(HIDDEN_PREFIX)?.parse().ok()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    /// 1 (ace) through 13 (king). Placeholders carry 0.
    pub rank: u8,
}

impl Card {
    pub fn new(suit: Suit, rank: u8, deck: usize) -> Self {
        Self {
            id: CardId::new(suit, rank, deck),
            suit,
            rank,
        }
    }

    /// Placeholder standing in for a card the viewer may not see.
    pub fn hidden(index: usize) -> Self {
        Self {
            id: CardId::hidden(index),
            suit: Suit::Spades,
            rank: 0,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.rank == 0
    }

    pub fn is_ace_of_hearts(&self) -> bool {
        self.suit == Suit::Hearts && self.rank == ACE
    }

    pub fn display_name(&self) -> String {
        if self.is_hidden() {
            return "Hidden card".to_string();
        }
        let rank = match self.rank {
            1 => "Ace".to_string(),
            11 => "Jack".to_string(),
            12 => "Queen".to_string(),
            13 => "King".to_string(),
            n => n.to_string(),
        };
        format!("{rank} of {}", self.suit.title())
    }
}

/// A card on the table, tagged with who played it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedCard {
    #[serde(flatten)]
    pub card: Card,
    pub player_id: PlayerId,
    /// Only recorded for the Ace of Hearts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ace_is_high: Option<bool>,
}
