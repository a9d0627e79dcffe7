//! Per-viewer state personalization.

use crate::domain::bidding::available_bets;
use crate::domain::cards_types::{Card, PlayedCard};
use crate::domain::state::{GameState, Player, PlayerId};

/// Whether `viewer` may see the cards in `owner`'s hand.
///
/// Normally players see only their own hand. In the blind round the rule
/// inverts: everyone sees the other hands but not their own.
pub fn can_see_hand(state: &GameState, owner: &Player, viewer: &str) -> bool {
    let own = owner.id == viewer;
    if state.is_blind_round {
        !own
    } else {
        own
    }
}

fn mask_hand(hand: &mut [Card]) {
    for (i, card) in hand.iter_mut().enumerate() {
        *card = Card::hidden(i);
    }
}

/// Copy of `state` as `viewer` is allowed to see it. Hidden hands keep
/// their length; each card becomes a `hidden-<index>` placeholder.
pub fn personalize(state: &GameState, viewer: &str) -> GameState {
    let mut view = state.clone();
    for i in 0..view.players.len() {
        if !can_see_hand(state, &state.players[i], viewer) {
            mask_hand(&mut view.players[i].hand);
        }
    }
    view
}

/// What a seated player can see when it is their turn to decide.
///
/// Built from the personalized state, so in the blind round the hand
/// holds placeholders whose ids are still valid to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiView {
    pub player_id: PlayerId,
    pub hand: Vec<Card>,
    pub bet: Option<u8>,
    pub tricks_won: u8,
    pub cards_per_player: u8,
    pub total_bets: u16,
    /// Cards already on the table this trick, in play order.
    pub trick: Vec<PlayedCard>,
    pub player_count: usize,
    /// How many players have bet so far this round.
    pub bets_placed: usize,
}

impl AiView {
    pub fn for_player(state: &GameState, who: &str) -> Option<Self> {
        let view = personalize(state, who);
        let me = view.player(who)?;
        Some(Self {
            player_id: me.id.clone(),
            hand: me.hand.clone(),
            bet: me.bet,
            tricks_won: me.tricks_won,
            cards_per_player: view.cards_per_player,
            total_bets: view.total_bets,
            trick: view.current_trick.cards.clone(),
            player_count: view.players.len(),
            bets_placed: view.players.iter().filter(|p| p.bet.is_some()).count(),
        })
    }

    pub fn legal_bets(&self) -> Vec<u8> {
        available_bets(self.cards_per_player, self.total_bets)
    }

    /// Any card in hand may be played.
    pub fn legal_plays(&self) -> &[Card] {
        &self.hand
    }

    pub fn is_leading(&self) -> bool {
        self.trick.is_empty()
    }

    pub fn is_last_to_bet(&self) -> bool {
        self.bets_placed + 1 == self.player_count
    }

    /// Tricks still wanted to make the bet; negative when already over.
    pub fn tricks_needed(&self) -> i32 {
        self.bet.unwrap_or(0) as i32 - self.tricks_won as i32
    }
}
