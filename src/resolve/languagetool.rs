//! LanguageTool HTTP resolver.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::Resolver;
use crate::config::ResolverConfig;
use crate::error::{Error, Result};

/// Resolver backed by the LanguageTool `/v2/check` API.
///
/// Each lookup is a `GET {endpoint}/v2/check?text=..&language=..&enabledOnly=false`.
/// The top replacement of the first match wins.
#[derive(Debug, Clone)]
pub struct LanguageToolResolver {
    client: Client,
    endpoint: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<CheckMatch>,
}

#[derive(Debug, Deserialize)]
struct CheckMatch {
    #[serde(default)]
    replacements: Vec<Replacement>,
}

#[derive(Debug, Deserialize)]
struct Replacement {
    value: String,
}

impl CheckResponse {
    fn top_replacement(self) -> String {
        self.matches
            .into_iter()
            .next()
            .and_then(|m| m.replacements.into_iter().next())
            .map(|r| r.value)
            .unwrap_or_default()
    }
}

impl LanguageToolResolver {
    /// Build a resolver with its own HTTP client.
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &config.endpoint, &config.language))
    }

    /// Build a resolver around an existing client.
    pub fn with_client(client: Client, endpoint: &str, language: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            language: language.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

#[async_trait]
impl Resolver for LanguageToolResolver {
    async fn resolve(&self, word: &str) -> Result<String> {
        if word.is_empty() {
            return Ok(String::new());
        }

        let url = format!("{}/v2/check", self.endpoint);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("text", word),
                ("language", self.language.as_str()),
                ("enabledOnly", "false"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Resolution(format!(
                "LanguageTool returned {status} for {word:?}: {body}"
            )));
        }

        let body: CheckResponse = response
            .json()
            .await
            .map_err(|e| Error::Resolution(format!("malformed LanguageTool response: {e}")))?;
        Ok(body.top_replacement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_replacement_of_first_match() {
        let body: CheckResponse = serde_json::from_str(
            r#"{"software":{"name":"LanguageTool"},"matches":[
                {"message":"Possible spelling mistake found.","replacements":[{"value":"DGS"},{"value":"AGS"}]},
                {"message":"other","replacements":[{"value":"nope"}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(body.top_replacement(), "DGS");
    }

    #[test]
    fn test_no_suggestion() {
        let none: CheckResponse = serde_json::from_str(r#"{"matches":[]}"#).unwrap();
        assert_eq!(none.top_replacement(), "");

        let empty: CheckResponse =
            serde_json::from_str(r#"{"matches":[{"replacements":[]}]}"#).unwrap();
        assert_eq!(empty.top_replacement(), "");

        let missing: CheckResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.top_replacement(), "");
    }

    #[test]
    fn test_endpoint_trailing_slash() {
        let resolver =
            LanguageToolResolver::with_client(Client::new(), "http://localhost:8081/", "fr");
        assert_eq!(resolver.endpoint(), "http://localhost:8081");
        assert_eq!(resolver.language(), "fr");
    }

    #[tokio::test]
    async fn test_empty_word_skips_request() {
        // Nothing listens on this port; an actual request would fail.
        let resolver = LanguageToolResolver::with_client(Client::new(), "http://127.0.0.1:9", "en-US");
        assert_eq!(resolver.resolve("").await.unwrap(), "");
    }
}
