//! Command dispatcher: routes an incoming update to one handler and replies
//! through the messaging port.

use std::sync::Arc;

use crate::{
    commands::Route,
    config::Config,
    domain::{ChatId, UserId},
    errors::Error,
    messaging::{port::MessagingPort, types::IncomingUpdate},
    ports::{ProfileLookup, Translator},
    profile::{format_profile_caption, parse_profile_identifier},
    utils::{split_text_chunks, truncate_text},
    Result,
};

pub const TRANSLATION_LABEL: &str = "🔤 Translation:\n";
pub const RESTART_REFUSED: &str = "❌ You are not authorized.";
pub const RESTARTING: &str = "♻️ Restarting bot...";
pub const PICTURE_NOT_AVAILABLE: &str = "(Profile picture not available)";

/// What the caller should do after an update was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Terminate the process so the supervisor relaunches it.
    Restart,
}

pub struct RelayBot {
    cfg: Arc<Config>,
    messenger: Arc<dyn MessagingPort>,
    translator: Arc<dyn Translator>,
    profiles: Option<Arc<dyn ProfileLookup>>,
    /// Our own `@username`, used to tell `/cmd@us` from `/cmd@someone_else`.
    username: Option<String>,
}

impl RelayBot {
    /// `profiles` is `None` when no Graph token is configured.
    pub fn new(
        cfg: Arc<Config>,
        messenger: Arc<dyn MessagingPort>,
        translator: Arc<dyn Translator>,
        profiles: Option<Arc<dyn ProfileLookup>>,
    ) -> Self {
        Self {
            cfg,
            messenger,
            translator,
            profiles,
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub async fn handle(&self, update: &IncomingUpdate) -> Result<Flow> {
        let route = Route::from_update(update, self.username.as_deref());
        let chat_id = update.chat_id();
        if route != Route::Ignore {
            tracing::info!(
                chat_id = chat_id.0,
                user_id = update.user_id().0,
                route = route.name(),
                "handling update"
            );
        }

        match route {
            Route::Help => {
                self.reply(chat_id, &self.help_text()).await?;
                Ok(Flow::Continue)
            }
            Route::Translate(text) => {
                self.translate(chat_id, &text).await?;
                Ok(Flow::Continue)
            }
            Route::Profile(link) => {
                self.profile(chat_id, link.as_deref()).await?;
                Ok(Flow::Continue)
            }
            Route::Restart => self.restart(chat_id, update.user_id()).await,
            Route::Ignore => Ok(Flow::Continue),
        }
    }

    fn help_text(&self) -> String {
        format!(
            "✅ Bot is running!\n\n\
Commands:\n\
/start - Show this message\n\
/translate <text> - Translate text into {lang}\n\
/fb <facebook_link> - Show public FB profile/page info and profile picture\n\
/restart - (owner only) Restart the bot\n\n\
Example: /translate Hello world\n\
Example: /fb https://www.facebook.com/zuck",
            lang = self.cfg.translate_target_lang
        )
    }

    async fn translate(&self, chat_id: ChatId, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return self.reply(chat_id, "Usage: /translate Hello world").await;
        }

        match self
            .translator
            .translate(text, &self.cfg.translate_target_lang)
            .await
        {
            Ok(res) => {
                tracing::debug!(
                    detected = res.detected_lang.as_deref().unwrap_or("?"),
                    "translation ok"
                );
                self.reply(chat_id, &format!("{TRANSLATION_LABEL}{}", res.text))
                    .await
            }
            Err(e) => {
                tracing::warn!(error = %e, "translation failed");
                self.reply(chat_id, &format!("❌ Translate error: {}", user_facing(&e)))
                    .await
            }
        }
    }

    async fn profile(&self, chat_id: ChatId, link: Option<&str>) -> Result<()> {
        let Some(link) = link.map(str::trim).filter(|l| !l.is_empty()) else {
            return self
                .reply(
                    chat_id,
                    "Usage: /fb https://www.facebook.com/username_or_page",
                )
                .await;
        };
        let Some(identifier) = parse_profile_identifier(link) else {
            return self
                .reply(chat_id, "❌ Please provide a valid Facebook URL.")
                .await;
        };
        let Some(profiles) = self.profiles.as_ref() else {
            return self
                .reply(
                    chat_id,
                    "❌ FB_ACCESS_TOKEN is not set (Graph API token).",
                )
                .await;
        };

        let profile = match profiles.lookup(&identifier).await {
            Ok(p) => p,
            Err(Error::Api(message)) => {
                tracing::warn!(%identifier, %message, "profile api error");
                return self
                    .reply(chat_id, &format!("❌ FB API error: {message}"))
                    .await;
            }
            Err(e) => {
                tracing::warn!(%identifier, error = %e, "profile lookup failed");
                return self
                    .reply(chat_id, &format!("❌ HTTP error: {}", user_facing(&e)))
                    .await;
            }
        };

        let caption = format_profile_caption(&profile, link);
        let Some(pic) = profile.picture_url.as_deref() else {
            return self
                .reply(chat_id, &format!("{caption}\n\n{PICTURE_NOT_AVAILABLE}"))
                .await;
        };

        let caption_limit = self
            .messenger
            .capabilities()
            .max_caption_len
            .min(self.cfg.telegram_caption_limit);
        let photo_caption = truncate_text(&caption, caption_limit);
        match self.messenger.send_photo(chat_id, pic, &photo_caption).await {
            Ok(_) => return Ok(()),
            Err(e) => {
                tracing::warn!(error = %e, "sending profile photo failed, falling back to text")
            }
        }

        self.reply(chat_id, &format!("{caption}\n\nProfile Picture: {pic}"))
            .await
    }

    async fn restart(&self, chat_id: ChatId, user_id: UserId) -> Result<Flow> {
        if let Some(owner) = self.cfg.owner_id {
            if user_id.0 != owner {
                tracing::warn!(user_id = user_id.0, "restart refused for non-owner");
                self.reply(chat_id, RESTART_REFUSED).await?;
                return Ok(Flow::Continue);
            }
        }

        tracing::info!(user_id = user_id.0, "restart requested");
        self.reply(chat_id, RESTARTING).await?;
        Ok(Flow::Restart)
    }

    async fn reply(&self, chat_id: ChatId, text: &str) -> Result<()> {
        let limit = self
            .messenger
            .capabilities()
            .max_message_len
            .min(self.cfg.telegram_message_limit);
        for chunk in split_text_chunks(text, limit) {
            self.messenger.send_text(chat_id, &chunk).await?;
        }
        Ok(())
    }
}

/// Inner message of an error, without the variant prefix.
fn user_facing(e: &Error) -> String {
    match e {
        Error::Http(m) | Error::Api(m) | Error::External(m) | Error::Config(m) => m.clone(),
        other => other.to_string(),
    }
}
