pub mod counter;
pub mod lol;
mod rate;
pub mod valorant;

pub use lol::{analyze_lol_team, LolAnalyzer, LolReport};
pub use valorant::{analyze_valorant_team, ValorantAnalyzer, ValorantReport};
