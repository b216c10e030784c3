use minijinja::{Environment, Template};
use once_cell::sync::Lazy;
use serde::Serialize;
use strum::{EnumIter, IntoEnumIterator};
use tracing::info;

use crate::error::BotResult;

static TEMPLATES_ENVIRONMENT: Lazy<Environment> = Lazy::new(|| {
    info!("Initializing templating engine environment.");
    let mut env = Environment::new();

    // Use strum to iterate over the variants of the enum.
    for template in MessageTemplate::iter() {
        // A template that fails to load surfaces as an error on `get`.
        if let Err(e) = env.add_template(template.name(), template.template()) {
            tracing::error!("Could not load template {}: {e}", template.name());
        }
    }

    info!("Templates loaded in templating engine environment.");

    env
});

#[derive(Debug, Clone, Copy, EnumIter)]
pub enum MessageTemplate {
    Usage,
    NoRecentScores,
    FetchError,
    Author,
    Title,
    Description,
    Footer,
}

impl MessageTemplate {
    pub fn name(&self) -> &'static str {
        match self {
            MessageTemplate::Usage => "usage.txt",
            MessageTemplate::NoRecentScores => "no_recent_scores.txt",
            MessageTemplate::FetchError => "fetch_error.txt",
            MessageTemplate::Author => "author.txt",
            MessageTemplate::Title => "title.txt",
            MessageTemplate::Description => "description.txt",
            MessageTemplate::Footer => "footer.txt",
        }
    }

    pub fn get(&self) -> BotResult<Template<'_, '_>> {
        Ok(TEMPLATES_ENVIRONMENT.get_template(self.name())?)
    }

    pub fn render<S: Serialize>(&self, ctx: S) -> BotResult<String> {
        Ok(self.get()?.render(ctx)?)
    }

    pub fn template(&self) -> &'static str {
        // \n\ at each code line end creates a line break at the proper position and discards further spaces in this line of code.
        match self {
            MessageTemplate::Usage => "Usage: `!osu <username>`",
            MessageTemplate::NoRecentScores => "No recent scores found for **{{ username }}**.",
            MessageTemplate::FetchError => "❌ Error fetching score for **{{ username }}**.",
            MessageTemplate::Author => "{{ username }}'s most recent play",
            MessageTemplate::Title => "{{ title }} [{{ version }}]",
            MessageTemplate::Description => {
                "{{ glyph }} {{ rank }} ▷ **{{ pp }} PP** ▷ {{ accuracy }} acc\n\
                 {{ score }} ▷ {{ combo }} ▷ {{ mods }}"
            }
            MessageTemplate::Footer => "Played on {{ timestamp }}",
        }
    }
}
