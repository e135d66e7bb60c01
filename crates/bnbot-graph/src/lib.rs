//! Graph API adapter (public profile/page lookup).
//!
//! One `GET /{id}?fields=...` per lookup, authorized with a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use bnbot_core::{
    errors::Error,
    ports::ProfileLookup,
    profile::{parse_graph_response, Profile, GRAPH_FIELDS},
    Result,
};

#[derive(Clone)]
pub struct GraphClient {
    base_url: Url,
    access_token: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphClient")
            .field("base_url", &self.base_url.as_str())
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl GraphClient {
    pub fn new(base_url: &str, access_token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid graph api url {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "graph api url cannot be a base: {base_url}"
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("graph http client: {e}")))?;
        Ok(Self {
            base_url,
            access_token: access_token.into(),
            http,
        })
    }

    /// `{base}/{identifier}` with the identifier percent-encoded as one segment.
    fn profile_url(&self, identifier: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config("graph api url cannot be a base".to_string()))?
            .pop_if_empty()
            .push(identifier);
        Ok(url)
    }
}

#[async_trait]
impl ProfileLookup for GraphClient {
    async fn lookup(&self, identifier: &str) -> Result<Profile> {
        let url = self.profile_url(identifier)?;

        let resp = self
            .http
            .get(url)
            .query(&[("fields", GRAPH_FIELDS)])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        // Graph reports failures as a JSON `error` object with a 4xx status,
        // so the body is parsed regardless of status.
        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| Error::Http(format!("{status}: {e}")))?;

        let profile = parse_graph_response(&body)?;
        tracing::debug!(%identifier, has_picture = profile.picture_url.is_some(), "profile fetched");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_identifier_as_single_segment() {
        let c = GraphClient::new("https://graph.example/v19.0/", "t", Duration::from_secs(1))
            .unwrap();
        assert_eq!(
            c.profile_url("zuck").unwrap().as_str(),
            "https://graph.example/v19.0/zuck"
        );
        assert_eq!(
            c.profile_url("a b#c").unwrap().as_str(),
            "https://graph.example/v19.0/a%20b%23c"
        );
    }

    #[test]
    fn debug_hides_token() {
        let c = GraphClient::new("https://graph.example", "secret", Duration::from_secs(1))
            .unwrap();
        assert!(!format!("{c:?}").contains("secret"));
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            GraphClient::new("not a url", "t", Duration::from_secs(1)),
            Err(Error::Config(_))
        ));
    }
}
