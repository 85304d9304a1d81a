use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use vanguard_model::lol::LolMatch;
use vanguard_model::valorant::ValorantMatch;

/// A match record whose outcome flag can be overwritten.
pub trait Outcome {
    fn won(&self) -> bool;
    fn set_won(&mut self, won: bool);
}

impl Outcome for LolMatch {
    fn won(&self) -> bool {
        self.won
    }

    fn set_won(&mut self, won: bool) {
        self.won = won;
    }
}

impl Outcome for ValorantMatch {
    fn won(&self) -> bool {
        self.won
    }

    fn set_won(&mut self, won: bool) {
        self.won = won;
    }
}

/// Relabel outcomes so that `win_percent` of the matches are wins, then
/// shuffle the batch so the wins are not bunched at the front.
///
/// The number of wins is `floor(len * win_percent / 100)`, with the percentage
/// clamped to `[0, 100]`. Only the outcome flag is touched; nested events keep
/// whatever outcome they were generated for.
pub fn relabel_win_rate<T: Outcome, R: Rng + ?Sized>(
    matches: &mut [T],
    win_percent: f64,
    rng: &mut R,
) {
    let win_percent = win_percent.clamp(0.0, 100.0);
    let wins = (matches.len() as f64 * win_percent / 100.0).floor() as usize;
    debug!("Relabelling {wins} of {} matches as wins", matches.len());

    for (index, data) in matches.iter_mut().enumerate() {
        data.set_won(index < wins);
    }
    matches.shuffle(rng);
}
