pub mod client_factory;
pub mod ollama_client;
pub mod openai_compatible_client;
