use std::sync::Arc;

use bnbot_core::{
    config::Config,
    ports::{ProfileLookup, Translator},
};
use bnbot_graph::GraphClient;
use bnbot_translate::GoogleTranslateClient;

#[tokio::main]
async fn main() -> Result<(), bnbot_core::Error> {
    bnbot_core::logging::init("bnbot")?;

    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            tracing::error!(error = %e, "startup configuration invalid, exiting");
            std::process::exit(1);
        }
    };

    let translator: Arc<dyn Translator> = Arc::new(GoogleTranslateClient::new(
        cfg.translate_api_url.clone(),
        cfg.translate_timeout,
    )?);

    let profiles: Option<Arc<dyn ProfileLookup>> = match cfg.graph_access_token.as_deref() {
        Some(token) => Some(Arc::new(GraphClient::new(
            &cfg.graph_api_url,
            token,
            cfg.profile_lookup_timeout,
        )?)),
        None => {
            tracing::warn!("FB_ACCESS_TOKEN not set; /fb lookups will be refused");
            None
        }
    };

    bnbot_telegram::router::run_polling(cfg, translator, profiles)
        .await
        .map_err(|e| bnbot_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
