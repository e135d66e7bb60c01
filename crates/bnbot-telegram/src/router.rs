use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use bnbot_core::{
    bot::RelayBot,
    config::Config,
    messaging::port::MessagingPort,
    ports::{ProfileLookup, Translator},
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<RelayBot>,
}

/// Build the dispatcher around the given service clients and long-poll until
/// the process is stopped.
pub async fn run_polling(
    cfg: Arc<Config>,
    translator: Arc<dyn Translator>,
    profiles: Option<Arc<dyn ProfileLookup>>,
) -> anyhow::Result<()> {
    let tg = Bot::new(cfg.telegram_bot_token.clone());

    // Our own username decides which `/cmd@botname` commands are ours.
    let own_username = match tg.get_me().await {
        Ok(me) => {
            tracing::info!(username = %me.username(), "bot is running");
            Some(me.username().to_string())
        }
        Err(e) => {
            tracing::warn!(error = %e, "get_me failed; commands addressed to a bot will be ignored");
            None
        }
    };
    tracing::info!(
        target_lang = %cfg.translate_target_lang,
        profile_lookup = profiles.is_some(),
        owner_restricted = cfg.owner_id.is_some(),
        "configuration loaded"
    );

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(tg.clone()));
    let mut relay = RelayBot::new(cfg, messenger, translator, profiles);
    if let Some(username) = own_username {
        relay = relay.with_username(username);
    }
    let state = Arc::new(AppState {
        bot: Arc::new(relay),
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(tg, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
