use async_trait::async_trait;

use crate::{profile::Profile, Result};

/// Result of one translation call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Translation {
    pub source_text: String,
    pub text: String,
    /// Source language as reported by the backend, if any.
    pub detected_lang: Option<String>,
}

/// Port for a machine-translation backend.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<Translation>;
}

/// Port for a social-network profile lookup.
///
/// Implementations return `Error::Api` when the remote side answers with an
/// error payload and `Error::Http` for transport failures.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    async fn lookup(&self, identifier: &str) -> Result<Profile>;
}
