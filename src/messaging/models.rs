use slack_morphism::prelude::{
    SlackBlock, SlackBlockImageElement, SlackBlockMarkDownText, SlackBlockText,
    SlackContextBlock, SlackContextBlockElement, SlackMessageContent, SlackSectionBlock,
    SlackSectionBlockElement,
};

use crate::core::score::{Reply, ScoreEmbed};

impl From<&Reply> for SlackMessageContent {
    fn from(reply: &Reply) -> Self {
        match reply {
            Reply::Text(text) => SlackMessageContent::new().with_text(text.clone()),
            Reply::Embed(embed) => {
                let description = slack_mrkdwn(&embed.description);
                SlackMessageContent::new()
                    // Shown in notifications and by clients without block support
                    .with_text(format!("{}\n{}", embed.title, description))
                    .with_blocks(embed_blocks(embed, &description))
            }
        }
    }
}

// Slack bold is a single asterisk, the embed text uses the double one.
fn slack_mrkdwn(text: &str) -> String {
    text.replace("**", "*")
}

// Slack counterpart of a rich embed: an author line, the linked title and
// description next to the cover, and a footer.
fn embed_blocks(embed: &ScoreEmbed, description: &str) -> Vec<SlackBlock> {
    let author = SlackContextBlock::new(vec![
        SlackContextBlockElement::Image(SlackBlockImageElement::new(
            embed.author.icon_url.clone(),
            embed.author.name.clone(),
        )),
        SlackContextBlockElement::MarkDown(SlackBlockMarkDownText::new(format!(
            "<{}|{}>",
            embed.author.url, embed.author.name
        ))),
    ]);

    let body = SlackSectionBlock::new()
        .with_text(SlackBlockText::MarkDown(SlackBlockMarkDownText::new(
            format!("*<{}|{}>*\n{}", embed.url, embed.title, description),
        )))
        .with_accessory(SlackSectionBlockElement::Image(SlackBlockImageElement::new(
            embed.thumbnail.clone(),
            embed.title.clone(),
        )));

    let footer = SlackContextBlock::new(vec![SlackContextBlockElement::MarkDown(
        SlackBlockMarkDownText::new(embed.footer.clone()),
    )]);

    vec![
        SlackBlock::Context(author),
        SlackBlock::Section(body),
        SlackBlock::Context(footer),
    ]
}
