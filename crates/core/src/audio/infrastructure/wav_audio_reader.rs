use std::path::Path;

use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::audio_segment::AudioSegment;

/// WAV decoder backed by hound. Accepts 16-bit integer PCM and downmixes
/// interleaved channels to mono by averaging. Resampling is out of scope, so
/// the file's sample rate must already match the requested one.
pub struct WavAudioReader;

impl WavAudioReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WavAudioReader {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioReader for WavAudioReader {
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<AudioSegment, Box<dyn std::error::Error>> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        if spec.sample_rate != target_sample_rate {
            return Err(format!(
                "Expected {target_sample_rate} Hz sample rate, found {} Hz",
                spec.sample_rate
            )
            .into());
        }

        if spec.bits_per_sample != 16 || spec.sample_format != hound::SampleFormat::Int {
            return Err(format!(
                "Expected 16-bit integer PCM, found {}-bit {:?}",
                spec.bits_per_sample, spec.sample_format
            )
            .into());
        }

        let channels = spec.channels as usize;
        let interleaved: Vec<i16> = reader.samples::<i16>().collect::<Result<_, _>>()?;

        let samples: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| {
                let sum: f32 = frame.iter().map(|&s| s as f32 / i16::MAX as f32).sum();
                sum / frame.len() as f32
            })
            .collect();

        Ok(AudioSegment::new(samples, spec.sample_rate))
    }
}
