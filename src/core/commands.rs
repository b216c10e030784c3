use crate::{
    core::{
        score::{Reply, ScoreEmbed},
        templates::MessageTemplate,
    },
    error::{BotError, BotResult},
    osu::client::Osu,
};

use minijinja::context;
use slack_morphism::SlackBotId;
use tracing::{error, info};

pub const PREFIX: &str = "!osu";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Trigger without a username
    Usage,
    RecentScore(String),
}

impl Command {
    pub fn is_command(input: &str) -> bool {
        input.starts_with(PREFIX)
    }

    /// Parse a chat message. Returns `None` for messages that are not addressed to the bot.
    pub fn build_from(input: &str) -> Option<Command> {
        if !Command::is_command(input) {
            return None;
        }

        // The first word is the prefix itself, the second one the username.
        match input.split_whitespace().nth(1) {
            Some(username) => Some(Command::RecentScore(username.to_string())),
            None => Some(Command::Usage),
        }
    }

    /// Parse an inbound chat message. Messages posted by a bot, our own
    /// replies included, never trigger a command.
    pub fn from_message(bot_id: Option<&SlackBotId>, text: Option<&str>) -> Option<Command> {
        match bot_id {
            Some(_) => None,
            None => text.and_then(Command::build_from),
        }
    }

    /// Run the command against the osu! API. Lookup failures are rendered as
    /// a generic message, their detail is only logged.
    pub async fn execute(&self, osu: &Osu) -> BotResult<Reply> {
        match self {
            Command::Usage => Ok(Reply::Text(MessageTemplate::Usage.render(context! {})?)),
            Command::RecentScore(username) => match osu.latest_score(username).await {
                Ok(Some(card)) => {
                    info!("Found recent play of {username} on beatmap {}", card.beatmap.id);
                    Ok(Reply::Embed(ScoreEmbed::new(&card, osu.base_url())?))
                }
                Ok(None) => Ok(Reply::Text(
                    MessageTemplate::NoRecentScores.render(context! { username => username })?,
                )),
                Err(e) => {
                    let error = BotError::Osu(e);
                    error!("Could not fetch recent play of {username}. {error}");
                    Ok(Reply::Text(
                        MessageTemplate::FetchError.render(context! { username => username })?,
                    ))
                }
            },
        }
    }
}
