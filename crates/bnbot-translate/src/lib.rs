//! Translation adapter.
//!
//! Talks to the public `translate_a/single` endpoint (the one the Google
//! Translate web widget uses) and implements the core `Translator` port.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use bnbot_core::{
    errors::Error,
    ports::{Translation, Translator},
    Result,
};

#[derive(Clone, Debug)]
pub struct GoogleTranslateClient {
    base_url: String,
    http: reqwest::Client,
}

impl GoogleTranslateClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("translate http client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<Translation> {
        let resp = self
            .http
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| Error::Http(format!("translate request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::External(format!(
                "translate failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let v: Value = resp
            .json()
            .await
            .map_err(|e| Error::Http(format!("translate json error: {e}")))?;

        let (translated, detected_lang) = parse_translate_response(&v)?;
        tracing::debug!(
            chars = text.chars().count(),
            detected = detected_lang.as_deref().unwrap_or("?"),
            target = target_lang,
            "translated"
        );

        Ok(Translation {
            source_text: text.to_string(),
            text: translated,
            detected_lang,
        })
    }
}

/// Pull the translated text and detected source language out of the nested
/// array response: `[[["<out>","<in>",..],..], null, "<src>", ..]`.
pub fn parse_translate_response(v: &Value) -> Result<(String, Option<String>)> {
    let segments = v
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::External("unexpected translate response shape".to_string()))?;

    let text = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(Value::as_str))
        .collect::<String>();

    if text.trim().is_empty() {
        return Err(Error::External("translate returned empty text".to_string()));
    }

    let detected = v.get(2).and_then(Value::as_str).map(str::to_string);
    Ok((text, detected))
}
