pub const WHISPER_MODEL_NAME: &str = "ggml-base.bin";
pub const WHISPER_MODEL_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.bin";

/// Whisper inference expects 16 kHz mono input.
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";

pub const SUMMARY_PROMPT: &str = "Summarize following text: ";
pub const TASKS_PROMPT: &str = "Extract tasks from the text: ";
