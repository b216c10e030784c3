use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

// Only the fields the bot renders are deserialized, the API returns a lot more.

#[derive(Debug, Clone, Deserialize)]
pub struct OsuUser {
    pub id: u64,
    pub username: String,
    pub avatar_url: String,
}

/// Letter grade of a play. The API also knows silver and failed grades
/// (`XH`, `X`, `SH`, `F`), those are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Rank {
    SS,
    S,
    A,
    B,
    C,
    D,
    Other(String),
}

impl From<String> for Rank {
    fn from(input: String) -> Self {
        match input.as_str() {
            "SS" => Rank::SS,
            "S" => Rank::S,
            "A" => Rank::A,
            "B" => Rank::B,
            "C" => Rank::C,
            "D" => Rank::D,
            _ => Rank::Other(input),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rank::SS => write!(f, "SS"),
            Rank::S => write!(f, "S"),
            Rank::A => write!(f, "A"),
            Rank::B => write!(f, "B"),
            Rank::C => write!(f, "C"),
            Rank::D => write!(f, "D"),
            Rank::Other(raw) => write!(f, "{}", raw),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentScore {
    pub rank: Rank,
    pub pp: Option<f64>,
    /// Fraction between 0 and 1.
    pub accuracy: f64,
    pub score: u64,
    /// Combo achieved by the player, not the beatmap maximum.
    pub max_combo: u32,
    #[serde(default)]
    pub mods: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub beatmap: ScoreBeatmap,
    pub beatmapset: ScoreBeatmapset,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreBeatmap {
    pub id: u64,
    /// Difficulty name.
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreBeatmapset {
    pub title: String,
    pub covers: Covers,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Covers {
    pub cover: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Beatmap {
    pub id: u64,
    pub max_combo: u32,
}

/// Everything needed to render the most recent play of a user.
#[derive(Debug, Clone)]
pub struct ScoreCard {
    pub user: OsuUser,
    pub score: RecentScore,
    pub beatmap: Beatmap,
}
