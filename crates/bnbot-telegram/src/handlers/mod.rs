//! Telegram update handlers.
//!
//! Each handler converts the teloxide message into a core `IncomingUpdate`,
//! hands it to `RelayBot` and acts on the returned `Flow`.

use std::{sync::Arc, time::Duration};

use teloxide::{prelude::*, types::Message};

use bnbot_core::{
    bot::Flow,
    commands::parse_command,
    domain::{ChatId, UserId},
    messaging::types::{Command, IncomingUpdate, TextMessage},
};

use crate::router::AppState;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(update) = to_incoming(&msg) else {
        return Ok(());
    };

    match state.bot.handle(&update).await {
        Ok(Flow::Continue) => {}
        Ok(Flow::Restart) => restart_process().await,
        Err(e) => {
            tracing::warn!(chat_id = msg.chat.id.0, error = %e, "failed to handle update");
        }
    }

    Ok(())
}

/// Exit so the process supervisor relaunches the bot.
async fn restart_process() {
    // Give the "restarting" reply time to leave the process.
    tokio::time::sleep(Duration::from_millis(500)).await;
    tracing::info!("exiting for restart");
    std::process::exit(0);
}

pub fn to_incoming(msg: &Message) -> Option<IncomingUpdate> {
    let user = msg.from()?;
    incoming_from_parts(
        msg.chat.id.0,
        user.id.0 as i64,
        user.username.clone(),
        msg.text(),
    )
}

/// Text starting with `/` is a command, any other text is a plain message.
/// Messages without text are dropped.
pub fn incoming_from_parts(
    chat_id: i64,
    user_id: i64,
    username: Option<String>,
    text: Option<&str>,
) -> Option<IncomingUpdate> {
    let text = text?;
    let chat_id = ChatId(chat_id);
    let user_id = UserId(user_id);

    if text.starts_with('/') {
        let parsed = parse_command(text);
        return Some(IncomingUpdate::Command(Command {
            chat_id,
            user_id,
            username,
            name: parsed.name,
            mention: parsed.mention,
            args: parsed.args,
        }));
    }

    Some(IncomingUpdate::Text(TextMessage {
        chat_id,
        user_id,
        username,
        text: text.to_string(),
    }))
}
