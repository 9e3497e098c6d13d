use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use scribe_core::audio::domain::audio_reader::AudioReader;
use scribe_core::audio::infrastructure::wav_audio_reader::WavAudioReader;
use scribe_core::chat::infrastructure::client_factory::create_chat_client;
use scribe_core::diarization::domain::diarizer::Diarizer;
use scribe_core::diarization::domain::overlap_aligner::AlignedSegment;
use scribe_core::diarization::infrastructure::hosted_diarizer::HostedDiarizer;
use scribe_core::pipeline::meeting_notes_use_case::MeetingNotesUseCase;
use scribe_core::pipeline::transcribe_meeting_use_case::TranscribeMeetingUseCase;
use scribe_core::pipeline::transcript_presenter::{TextPresenter, TranscriptPresenter};
use scribe_core::shared::config::{Config, ConfigError, Provider};
use scribe_core::shared::constants::{
    WHISPER_MODEL_NAME, WHISPER_MODEL_URL, WHISPER_SAMPLE_RATE,
};
use scribe_core::shared::model_resolver;
use scribe_core::transcription::domain::transcriber::Transcriber;
use scribe_core::transcription::infrastructure::whisper_transcriber::WhisperTranscriber;

/// Meeting transcription with speaker labels and AI-generated notes.
#[derive(Parser)]
#[command(name = "scribe")]
struct Cli {
    /// Input audio file (16 kHz WAV). Required unless --init-config is used.
    input: Option<PathBuf>,

    /// Config file (default: platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Chat provider: groq, lmstudio, ollama, or openai.
    #[arg(long)]
    provider: Option<Provider>,

    /// Transcription language hint (e.g. "en", "german"); default auto-detect.
    #[arg(long)]
    language: Option<String>,

    /// Whisper model path (skips the cached-model download).
    #[arg(long)]
    whisper_model: Option<PathBuf>,

    /// Separate the transcript by speakers (requires diarization config).
    #[arg(long)]
    diarize: bool,

    /// Stream a summary of the transcript after printing it.
    #[arg(long)]
    summary: bool,

    /// Stream a task list extracted from the transcript.
    #[arg(long)]
    tasks: bool,

    /// Write the effective config (defaults plus overrides) to the platform
    /// config directory and exit.
    #[arg(long)]
    init_config: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = load_config(&cli)?;

    if cli.init_config {
        let path = config.save()?;
        println!("Config written to {}", path.display());
        return Ok(());
    }

    let input = cli.input.as_ref().ok_or("Input audio file is required")?;

    let transcriber = build_transcriber(&cli, &config)?;
    let diarizer = if cli.diarize {
        Some(build_diarizer(&config)?)
    } else {
        None
    };

    let audio = WavAudioReader::new().read_audio(input, WHISPER_SAMPLE_RATE)?;
    log::info!(
        "Read {:.1}s of audio from {}",
        audio.duration(),
        input.display()
    );

    let language = cli.language.clone().or_else(|| config.language.clone());
    let use_case = TranscribeMeetingUseCase::new(transcriber, diarizer, language);
    let aligned = use_case.run(&audio)?;

    print_transcript(&aligned)?;

    let want_summary = cli.summary || config.summarize;
    if want_summary || cli.tasks {
        let transcript = full_text(&aligned);
        let client = create_chat_client(&config)?;
        let notes = MeetingNotesUseCase::new(client);

        if want_summary {
            println!("\n## Summary\n");
            stream_to_stdout(notes.summarize(&transcript)?)?;
        }
        if cli.tasks {
            println!("\n## Tasks\n");
            stream_to_stdout(notes.extract_tasks(&transcript)?)?;
        }
    }

    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.input.is_none() && !cli.init_config {
        return Err("Input audio file is required unless --init-config is used".into());
    }
    if let Some(ref input) = cli.input {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
    }
    if let Some(ref path) = cli.whisper_model {
        if !path.exists() {
            return Err(format!("Whisper model not found: {}", path.display()).into());
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if let Some(provider) = cli.provider {
        config.provider = provider;
    }
    Ok(config)
}

fn build_transcriber(
    cli: &Cli,
    config: &Config,
) -> Result<Box<dyn Transcriber>, Box<dyn std::error::Error>> {
    let model_path = match cli.whisper_model.clone().or_else(|| config.whisper_model.clone()) {
        Some(path) => path,
        None => {
            let path = model_resolver::resolve(
                WHISPER_MODEL_NAME,
                WHISPER_MODEL_URL,
                Some(Box::new(download_progress)),
            )?;
            eprintln!();
            path
        }
    };
    Ok(Box::new(WhisperTranscriber::new(&model_path)?))
}

fn build_diarizer(config: &Config) -> Result<Box<dyn Diarizer>, Box<dyn std::error::Error>> {
    let endpoint = config
        .diarization
        .endpoint
        .clone()
        .filter(|s| !s.is_empty());
    let token = config
        .diarization
        .api_token
        .clone()
        .filter(|s| !s.is_empty());
    match (endpoint, token) {
        (Some(endpoint), Some(token)) => Ok(Box::new(HostedDiarizer::new(endpoint, token))),
        _ => Err(Box::new(ConfigError::MissingDiarization)),
    }
}

fn print_transcript(aligned: &[AlignedSegment]) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let mut presenter = TextPresenter::new(stdout.lock());
    for segment in aligned {
        presenter.present(segment)?;
    }
    Ok(())
}

fn full_text(aligned: &[AlignedSegment]) -> String {
    aligned
        .iter()
        .map(|a| a.segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn stream_to_stdout(
    stream: scribe_core::chat::domain::chat_client::ChatStream,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout();
    for fragment in stream {
        write!(stdout, "{}", fragment?)?;
        stdout.flush()?;
    }
    println!();
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading whisper model... {pct}%");
    } else {
        eprint!("\rDownloading whisper model... {downloaded} bytes");
    }
}
