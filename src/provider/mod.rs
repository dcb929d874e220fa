//! Text generation providers
//!
//! Every backend implements [`TextGenerator`]: given a prompt and a maximum
//! output size it produces generated text or fails. The service picks one
//! implementation at startup from [`ProviderConfig`].

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::ItineraryError;
use crate::config::{ProviderConfig, ProviderKind};

pub mod anthropic;
pub mod google;

pub use anthropic::AnthropicProvider;
pub use google::GoogleProvider;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Parameters of a single generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

/// Capability shared by all generation backends
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Output token budget applied to every request
    fn max_tokens(&self) -> u32;

    /// Sampling temperature applied to every request, if any
    fn temperature(&self) -> Option<f32> {
        None
    }

    /// Send one request to the provider. No retries are attempted.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Build the request for `prompt` with this provider's fixed settings
    fn request_for(&self, prompt: String) -> GenerationRequest {
        GenerationRequest {
            prompt,
            max_tokens: self.max_tokens(),
            temperature: self.temperature(),
        }
    }
}

/// Build the HTTP client shared by a provider for its whole lifetime
pub(crate) fn http_client(timeout_seconds: u32) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds.into()))
        .connect_timeout(CONNECT_TIMEOUT)
        .user_agent(concat!("itinerary/", env!("CARGO_PKG_VERSION")))
        .build()
        .with_context(|| "Failed to create HTTP client")
}

/// Read the provider credential from the process environment
pub fn api_key_from_env(kind: ProviderKind) -> Result<String> {
    let name = kind.api_key_env();
    match std::env::var(name) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ItineraryError::config(format!("Missing {name} env var")).into()),
    }
}

/// Construct the configured provider
pub fn from_config(config: &ProviderConfig, api_key: String) -> Result<Arc<dyn TextGenerator>> {
    let provider: Arc<dyn TextGenerator> = match config.kind {
        ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(api_key, config)?),
        ProviderKind::Google => Arc::new(GoogleProvider::new(api_key, config)?),
    };

    tracing::info!(
        provider = provider.name(),
        max_tokens = provider.max_tokens(),
        temperature = ?provider.temperature(),
        "Configured generation provider"
    );

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_selects_provider() {
        let mut config = ProviderConfig::default();
        let provider = from_config(&config, "test-key".to_string()).unwrap();
        assert_eq!(provider.name(), "anthropic");

        config.kind = ProviderKind::Google;
        let provider = from_config(&config, "test-key".to_string()).unwrap();
        assert_eq!(provider.name(), "google");
    }

    #[test]
    fn test_api_key_from_env() {
        let name = ProviderKind::Google.api_key_env();
        let previous = std::env::var_os(name);

        // SAFETY: Test environment, no other test reads this variable
        unsafe {
            std::env::remove_var(name);
        }
        let missing = api_key_from_env(ProviderKind::Google).unwrap_err();
        assert!(missing.to_string().contains("Missing GOOGLE_API_KEY env var"));
        assert!(matches!(
            missing.downcast_ref::<ItineraryError>(),
            Some(ItineraryError::Config { .. })
        ));

        // SAFETY: Test environment, setting test values only
        unsafe {
            std::env::set_var(name, "   \t ");
        }
        assert!(api_key_from_env(ProviderKind::Google).is_err());

        // SAFETY: Test environment, setting test values only
        unsafe {
            std::env::set_var(name, "  google-key-123\n");
        }
        let key = api_key_from_env(ProviderKind::Google);

        // SAFETY: Test cleanup
        unsafe {
            match previous {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }

        assert_eq!(key.unwrap(), "google-key-123");
    }

    #[test]
    fn test_request_for_uses_provider_settings() {
        let config = ProviderConfig {
            kind: ProviderKind::Google,
            max_tokens: Some(512),
            temperature: Some(0.3),
            ..ProviderConfig::default()
        };
        let provider = from_config(&config, "test-key".to_string()).unwrap();
        let request = provider.request_for("hello".to_string());
        assert_eq!(request.prompt, "hello");
        assert_eq!(request.max_tokens, 512);
        assert_eq!(request.temperature, Some(0.3));
    }
}
