use std::ops::RangeInclusive;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
/// Largest party that still plays from a single deck.
pub const SINGLE_DECK_MAX_PLAYERS: usize = 6;
pub const DECK_SIZE: usize = 52;

// Hand-size schedule: 5 → 1 (the blind round) → 5. Nine rounds.
pub const ROUND_SCHEDULE: [u8; 9] = [5, 4, 3, 2, 1, 2, 3, 4, 5];

pub fn cards_for_round(round_index: usize) -> Option<u8> {
    ROUND_SCHEDULE.get(round_index).copied()
}

pub fn is_last_round(round_index: usize) -> bool {
    round_index + 1 == ROUND_SCHEDULE.len()
}

/// In the one-card round players cannot see their own card.
pub fn is_blind_round(cards_per_player: u8) -> bool {
    cards_per_player == 1
}

pub fn deck_count(player_count: usize) -> usize {
    if player_count > SINGLE_DECK_MAX_PLAYERS {
        2
    } else {
        1
    }
}

pub fn bet_range(cards_per_player: u8) -> RangeInclusive<u8> {
    0..=cards_per_player
}
