//! Plain-text rendering of the human's view of the table.

use std::fmt::Write;

use bisca::domain::{available_bets, rank_players, GameState, Phase, PlayedCard, ROUND_SCHEDULE};

fn played(card: &PlayedCard) -> String {
    match card.ace_is_high {
        Some(true) => format!("{} (high)", card.card.display_name()),
        Some(false) => format!("{} (low)", card.card.display_name()),
        None => card.card.display_name(),
    }
}

pub fn render(state: &GameState, me: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n== Round {}/{} | {} card(s){} | {:?} ==",
        state.current_round + 1,
        ROUND_SCHEDULE.len(),
        state.cards_per_player,
        if state.is_blind_round { " | blind" } else { "" },
        state.phase
    );

    for p in &state.players {
        let marker = if state.is_current(&p.id) { ">" } else { " " };
        let bet = p.bet.map_or_else(|| "-".to_string(), |b| b.to_string());
        let _ = writeln!(
            out,
            "{marker} {:<12} bet {:>2}  tricks {:>2}  score {:>4}{}{}",
            p.nickname,
            bet,
            p.tricks_won,
            p.score,
            if p.id == me { "  (you)" } else { "" },
            if p.connected { "" } else { "  [away]" },
        );
        if state.is_blind_round && p.id != me && !p.hand.is_empty() {
            let cards: Vec<String> = p.hand.iter().map(|c| c.display_name()).collect();
            let _ = writeln!(out, "      holds {}", cards.join(", "));
        }
    }

    if !state.current_trick.cards.is_empty() {
        let _ = writeln!(out, "table:");
        for card in &state.current_trick.cards {
            let who = state
                .player(&card.player_id)
                .map_or(card.player_id.as_str(), |p| p.nickname.as_str());
            let _ = writeln!(out, "  {who}: {}", played(card));
        }
        if let Some(winner) = state
            .current_trick
            .winner_id
            .as_deref()
            .and_then(|id| state.player(id))
        {
            let _ = writeln!(out, "  -> {} takes the trick", winner.nickname);
        }
    }

    if let Some(mine) = state.player(me) {
        if !mine.hand.is_empty() {
            let _ = writeln!(out, "your hand:");
            for (i, card) in mine.hand.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", i + 1, card.display_name());
            }
        }
    }

    match state.phase {
        Phase::Betting if state.is_current(me) => {
            let legal = available_bets(state.cards_per_player, state.total_bets);
            let _ = writeln!(out, "your bet? legal: {legal:?} (total so far {})", state.total_bets);
        }
        Phase::Playing if state.is_current(me) => {
            let _ = writeln!(out, "your turn: play <n>");
        }
        Phase::RoundEnd => {
            let _ = writeln!(out, "round over; type `ready` for the next one");
        }
        Phase::GameEnd => {
            let _ = writeln!(out, "final standings:");
            for s in rank_players(&state.players) {
                let _ = writeln!(out, "  {}. {} ({})", s.position, s.nickname, s.score);
            }
        }
        _ => {}
    }
    out
}
