use serde::Serialize;

use crate::domain::state::{GameState, Player, PlayerId};

/// Net score for one round. An exact bet scores the bet (an exact zero
/// scores 1); a miss costs the distance.
pub fn calculate_round_score(bet: u8, tricks_won: u8) -> i32 {
    if bet == tricks_won {
        return if bet == 0 { 1 } else { bet as i32 };
    }
    -((tricks_won as i32 - bet as i32).abs())
}

/// Apply round scoring to every player who bet.
pub fn apply_round_scoring(state: &mut GameState) {
    for player in &mut state.players {
        if let Some(bet) = player.bet {
            player.score += calculate_round_score(bet, player.tricks_won);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub player_id: PlayerId,
    pub nickname: String,
    pub score: i32,
    /// 1-based; equal scores share a position ("1, 1, 3").
    pub position: usize,
}

pub fn rank_players(players: &[Player]) -> Vec<Standing> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));

    let mut standings: Vec<Standing> = Vec::with_capacity(sorted.len());
    for (i, p) in sorted.into_iter().enumerate() {
        let position = match standings.last() {
            Some(prev) if prev.score == p.score => prev.position,
            _ => i + 1,
        };
        standings.push(Standing {
            player_id: p.id.clone(),
            nickname: p.nickname.clone(),
            score: p.score,
            position,
        });
    }
    standings
}

/// Every player tied at the top score.
pub fn game_winners(players: &[Player]) -> Vec<PlayerId> {
    let Some(best) = players.iter().map(|p| p.score).max() else {
        return Vec::new();
    };
    players
        .iter()
        .filter(|p| p.score == best)
        .map(|p| p.id.clone())
        .collect()
}
