use crate::chat::domain::chat_client::ChatClient;
use crate::shared::config::{Config, ConfigError, Provider};

use super::ollama_client::OllamaClient;
use super::openai_compatible_client::OpenAiCompatibleClient;

/// Creates the chat client for the configured provider.
///
/// Selection happens once here; everything downstream sees only the
/// `ChatClient` trait. OpenAI, Groq, and LM Studio share the
/// OpenAI-compatible wire format; Ollama uses its native API.
pub fn create_chat_client(config: &Config) -> Result<Box<dyn ChatClient>, ConfigError> {
    let provider = config.provider;
    let settings = config.active_provider();
    let base_url = config.provider_base_url();

    log::info!("Using chat provider {provider} (model={})", settings.model);

    match provider {
        Provider::Openai | Provider::Groq => {
            let api_key = settings
                .api_key
                .clone()
                .filter(|k| !k.is_empty())
                .ok_or(ConfigError::MissingApiKey(provider))?;
            Ok(Box::new(OpenAiCompatibleClient::new(
                base_url,
                Some(api_key),
                settings.model.clone(),
                settings.temperature,
            )))
        }
        // LM Studio is a local server; a key is accepted but not required
        Provider::Lmstudio => Ok(Box::new(OpenAiCompatibleClient::new(
            base_url,
            settings.api_key.clone(),
            settings.model.clone(),
            settings.temperature,
        ))),
        Provider::Ollama => Ok(Box::new(OllamaClient::new(
            base_url,
            settings.model.clone(),
        ))),
    }
}
