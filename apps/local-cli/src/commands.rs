//! Parsing of the line commands typed at the prompt.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bet(u8),
    /// 1-based position in the hand as displayed, plus the Ace of Hearts choice.
    Play {
        position: usize,
        ace_is_high: Option<bool>,
    },
    Ready,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  bet <n>                 place a bet
  play <n> [high|low]     play the n-th card of your hand
  ready                   start the next round
  show                    print the table again
  help                    this text
  quit                    leave the game";

pub fn parse(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("type `help` for commands".into());
    };
    let cmd = match verb.to_ascii_lowercase().as_str() {
        "bet" | "b" => {
            let n = words.next().ok_or("usage: bet <n>")?;
            let bet = n.parse().map_err(|_| format!("not a bet: {n}"))?;
            Command::Bet(bet)
        }
        "play" | "p" => {
            let n = words.next().ok_or("usage: play <n> [high|low]")?;
            let position: usize = n.parse().map_err(|_| format!("not a card number: {n}"))?;
            if position == 0 {
                return Err("cards are numbered from 1".into());
            }
            let ace_is_high = match words.next().map(str::to_ascii_lowercase).as_deref() {
                None => None,
                Some("high" | "h") => Some(true),
                Some("low" | "l") => Some(false),
                Some(other) => return Err(format!("expected high or low, got {other}")),
            };
            Command::Play {
                position,
                ace_is_high,
            }
        }
        "ready" | "r" => Command::Ready,
        "show" | "s" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument: {extra}"));
    }
    Ok(cmd)
}
