//! Social profile helpers: identifier extraction and Graph payload parsing.

use serde::Deserialize;
use serde_json::Value;

use crate::{errors::Error, Result};

/// Fields requested from the Graph API for every lookup.
pub const GRAPH_FIELDS: &str = "name,about,link,picture.type(large)";

/// Domains whose links in plain messages trigger a profile lookup.
pub const PROFILE_DOMAINS: &[&str] = &["facebook.com"];

const UNKNOWN_NAME: &str = "Unknown";
const NO_ABOUT: &str = "No public about/bio";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub about: String,
    pub picture_url: Option<String>,
}

/// Extract the lookup key from a profile URL.
///
/// Drops the query string and trailing slashes, then returns the last
/// non-empty path segment.
pub fn parse_profile_identifier(url: &str) -> Option<String> {
    let without_query = url.split('?').next().unwrap_or("");
    without_query
        .trim_end_matches('/')
        .rsplit('/')
        .find(|part| !part.is_empty())
        .map(|part| part.to_string())
}

/// True when `text` mentions one of [`PROFILE_DOMAINS`].
pub fn mentions_profile_domain(text: &str) -> bool {
    PROFILE_DOMAINS.iter().any(|d| text.contains(d))
}

/// First whitespace-separated token that mentions a profile domain.
pub fn find_profile_link(text: &str) -> Option<&str> {
    text.split_whitespace().find(|t| mentions_profile_domain(t))
}

#[derive(Deserialize)]
struct GraphPayload {
    name: Option<String>,
    about: Option<String>,
    bio: Option<String>,
    picture: Option<Value>,
}

/// Turn a Graph API JSON body into a [`Profile`].
///
/// A top-level `error` object becomes [`Error::Api`] carrying its `message`
/// (or the whole error value when there is no message).
pub fn parse_graph_response(body: &Value) -> Result<Profile> {
    if let Some(err) = body.get("error") {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| match err {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        return Err(Error::Api(message));
    }

    let payload: GraphPayload = serde_json::from_value(body.clone())?;

    let about = [payload.about, payload.bio]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| NO_ABOUT.to_string());

    // `picture` only counts when it is the `{ "data": { "url": .. } }` object.
    let picture_url = payload
        .picture
        .as_ref()
        .filter(|p| p.is_object())
        .and_then(|p| p.get("data"))
        .and_then(|d| d.get("url"))
        .and_then(Value::as_str)
        .filter(|u| !u.is_empty())
        .map(str::to_string);

    Ok(Profile {
        name: payload.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        about,
        picture_url,
    })
}

/// Caption shown with a profile; `link` is the URL the user sent.
pub fn format_profile_caption(profile: &Profile, link: &str) -> String {
    format!(
        "📌 Name: {}\nℹ️ About: {}\n🔗 Link: {}",
        profile.name, profile.about, link
    )
}
