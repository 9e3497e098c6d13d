use std::io::Cursor;

use serde::Deserialize;
use thiserror::Error;

use crate::audio::domain::audio_segment::AudioSegment;
use crate::diarization::domain::diarizer::Diarizer;
use crate::diarization::domain::turn::Turn;
use crate::shared::time_interval::TimeInterval;

#[derive(Error, Debug)]
pub enum DiarizeError {
    #[error("failed to encode audio for upload: {0}")]
    Encode(#[from] hound::Error),
    #[error("diarization request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("diarization API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed diarization response: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct DiarizationResponse {
    segments: Vec<DiarizationTurn>,
}

#[derive(Debug, Deserialize)]
struct DiarizationTurn {
    start: f64,
    end: f64,
    speaker: String,
}

/// Diarizer backed by a hosted HTTP API.
///
/// Uploads the audio as a WAV file and expects a JSON body of the form
/// `{"segments": [{"start": 0.0, "end": 2.4, "speaker": "SPEAKER_00"}, ...]}`.
pub struct HostedDiarizer {
    endpoint: String,
    api_token: String,
    http: reqwest::blocking::Client,
}

impl HostedDiarizer {
    pub fn new(endpoint: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_token: api_token.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    fn request_turns(&self, wav_bytes: Vec<u8>) -> Result<Vec<Turn>, DiarizeError> {
        let part = reqwest::blocking::multipart::Part::bytes(wav_bytes)
            .file_name("audio.wav")
            .mime_str("audio/wav")?;
        let form = reqwest::blocking::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .multipart(form)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiarizeError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let body = response.text()?;
        parse_turns(&body)
    }
}

impl Diarizer for HostedDiarizer {
    fn diarize(&self, audio: &AudioSegment) -> Result<Vec<Turn>, Box<dyn std::error::Error>> {
        let wav_bytes = encode_wav(audio)?;
        log::debug!(
            "Uploading {:.1}s of audio to diarization endpoint",
            audio.duration()
        );
        let turns = self.request_turns(wav_bytes)?;
        log::info!("Diarization returned {} turns", turns.len());
        Ok(turns)
    }
}

/// Encode mono samples as an in-memory 16-bit PCM WAV file.
fn encode_wav(audio: &AudioSegment) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate(),
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &sample in audio.samples() {
            writer.write_sample((sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

fn parse_turns(body: &str) -> Result<Vec<Turn>, DiarizeError> {
    let response: DiarizationResponse = serde_json::from_str(body)?;
    Ok(response
        .segments
        .into_iter()
        .map(|t| Turn::new(TimeInterval::new(t.start, t.end), t.speaker))
        .collect())
}
