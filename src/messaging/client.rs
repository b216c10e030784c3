use crate::{
    config::Settings,
    core::commands::Command,
    error::{BotError, BotResult},
    osu::client::Osu,
};
use http::StatusCode;
use slack_morphism::{
    api::SlackApiChatPostMessageRequest,
    events::{SlackEventCallbackBody, SlackPushEventCallback},
    hyper_tokio::{SlackClientHyperConnector, SlackHyperClient},
    listener::{SlackClientEventsListenerEnvironment, SlackClientEventsUserState},
    SlackApiToken, SlackApiTokenValue, SlackClient, SlackClientSocketModeConfig,
    SlackClientSocketModeListener, SlackMessageContent, SlackSocketModeListenerCallbacks,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared with every event handler through the listener user state.
#[derive(Clone)]
struct BotState {
    osu: Arc<Osu>,
    bot_token: SlackApiToken,
}

async fn push_events_socket_mode_function(
    event: SlackPushEventCallback,
    client: Arc<SlackHyperClient>,
    states: SlackClientEventsUserState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Only Message events carry commands.
    if let SlackEventCallbackBody::Message(message) = event.event {
        let command = Command::from_message(
            message.sender.bot_id.as_ref(),
            message.content.as_ref().and_then(|content| content.text.as_deref()),
        );

        if let (Some(command), Some(channel_id)) = (command, message.origin.channel) {
            info!("Received command {command:?} in channel id {channel_id}");

            // Scoped so the state lock is not held across the API calls.
            let state = {
                let storage = states.read().await;
                storage.get_user_state::<BotState>().cloned()
            };
            let state = match state {
                Some(state) => state,
                None => {
                    warn!("Bot state missing from listener environment, dropping command");
                    return Ok(());
                }
            };

            let reply = command.execute(&state.osu).await?;

            // Reply in a thread under the triggering message.
            let request = SlackApiChatPostMessageRequest::new(
                channel_id,
                SlackMessageContent::from(&reply),
            )
            .with_thread_ts(message.origin.ts);

            let session = client.open_session(&state.bot_token);
            session.chat_post_message(&request).await?;
        }
    }
    Ok(())
}

fn socket_mode_error_handler(
    err: Box<dyn std::error::Error + Send + Sync>,
    _client: Arc<SlackHyperClient>,
    _states: SlackClientEventsUserState,
) -> StatusCode {
    let error = BotError::Slack(err.to_string());
    error!("{error}");

    // This return value should be OK if we want to return successful ack to the Slack server using Web-sockets
    // https://api.slack.com/apis/connections/socket-implement#acknowledge
    // so that Slack knows whether to retry
    StatusCode::OK
}

/// Connect to Slack in socket mode and answer commands until the connection is closed.
pub async fn initialize_messaging(settings: &Settings, osu: Osu) -> BotResult<()> {
    let client = Arc::new(SlackClient::new(SlackClientHyperConnector::new()));

    let bot_token_value: SlackApiTokenValue = settings.slack_token.clone().into();
    let state = BotState {
        osu: Arc::new(osu),
        bot_token: SlackApiToken::new(bot_token_value),
    };

    let socket_mode_callbacks =
        SlackSocketModeListenerCallbacks::new().with_push_events(push_events_socket_mode_function);

    let listener_environment = Arc::new(
        SlackClientEventsListenerEnvironment::new(client.clone())
            .with_error_handler(socket_mode_error_handler)
            .with_user_state(state),
    );

    let socket_mode_listener = SlackClientSocketModeListener::new(
        &SlackClientSocketModeConfig::new(),
        listener_environment.clone(),
        socket_mode_callbacks,
    );

    let app_token_value: SlackApiTokenValue = settings.slack_app_token.clone().into();
    let app_token: SlackApiToken = SlackApiToken::new(app_token_value);

    socket_mode_listener.listen_for(&app_token).await?;

    info!("Listening for commands.");
    socket_mode_listener.serve().await;

    Ok(())
}
