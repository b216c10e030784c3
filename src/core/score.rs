use itertools::Itertools;
use minijinja::context;

use crate::{
    core::templates::MessageTemplate,
    error::BotResult,
    osu::models::{Rank, ScoreCard},
    utils::{format_thousands, format_timestamp},
};

const NO_MOD: &str = "No Mod";

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: String,
    pub url: String,
}

/// Rich reply describing one play, rendered by the messaging layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEmbed {
    pub author: EmbedAuthor,
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    /// Always two lines: grade and performance, then score, combo and mods.
    pub description: String,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Embed(ScoreEmbed),
    Text(String),
}

pub fn rank_glyph(rank: &Rank) -> &'static str {
    match rank {
        Rank::SS | Rank::S => "🟨",
        Rank::A => "🟩",
        Rank::B => "🟦",
        Rank::C => "🟪",
        Rank::D => "🟥",
        Rank::Other(_) => "",
    }
}

// Rounded half away from zero, missing pp shows as 0
pub fn format_pp(pp: Option<f64>) -> String {
    format!("{:.0}", pp.unwrap_or_default().round())
}

pub fn format_accuracy(accuracy: f64) -> String {
    format!("{:.2}%", accuracy * 100.0)
}

pub fn format_combo(achieved: u32, maximum: u32) -> String {
    format!("x{achieved}/{maximum}")
}

pub fn format_mods(mods: &[String]) -> String {
    match mods.is_empty() {
        true => NO_MOD.to_string(),
        false => mods.iter().join(", "),
    }
}

impl ScoreEmbed {
    /// `site_url` is the osu! website root the profile and beatmap links point to.
    pub fn new(card: &ScoreCard, site_url: &str) -> BotResult<Self> {
        let ScoreCard {
            user,
            score,
            beatmap,
        } = card;

        let description = MessageTemplate::Description.render(context! {
            glyph => rank_glyph(&score.rank),
            rank => score.rank.to_string(),
            pp => format_pp(score.pp),
            accuracy => format_accuracy(score.accuracy),
            score => format_thousands(score.score),
            combo => format_combo(score.max_combo, beatmap.max_combo),
            mods => format_mods(&score.mods),
        })?;

        Ok(ScoreEmbed {
            author: EmbedAuthor {
                name: MessageTemplate::Author.render(context! { username => &user.username })?,
                icon_url: user.avatar_url.clone(),
                url: format!("{}/users/{}", site_url, user.id),
            },
            title: MessageTemplate::Title.render(context! {
                title => &score.beatmapset.title,
                version => &score.beatmap.version,
            })?,
            url: format!("{}/beatmaps/{}", site_url, score.beatmap.id),
            thumbnail: score.beatmapset.covers.cover.clone(),
            description,
            footer: MessageTemplate::Footer.render(context! {
                timestamp => format_timestamp(&score.created_at),
            })?,
        })
    }
}
