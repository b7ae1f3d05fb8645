//! Deterministic WAV file writer.
//!
//! Writes the canonical 44-byte RIFF header followed by the context's PCM
//! bytes, mono, with no timestamps or extra chunks. The BLAKE3 hash of the
//! PCM data identifies a rendered sound independently of its container.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{SfxError, SfxResult};
use crate::synth::{SampleFormat, SynthContext};

/// Size of the RIFF/fmt/data header.
pub const WAV_HEADER_LEN: usize = 44;

const FORMAT_PCM: u16 = 1;
const FORMAT_IEEE_FLOAT: u16 = 3;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (always 1).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample: 8, 16 or 32.
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a mono format for the given sample representation.
    pub fn mono(sample_rate: u32, sample_format: SampleFormat) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: sample_format.bits_per_sample(),
        }
    }

    /// Format matching a context's configuration.
    pub fn for_context(ctx: &SynthContext) -> Self {
        Self::mono(ctx.sample_rate(), ctx.sample_format())
    }

    /// Audio format tag: IEEE float for 32-bit samples, PCM otherwise.
    pub fn audio_format(&self) -> u16 {
        if self.bits_per_sample == 32 {
            FORMAT_IEEE_FLOAT
        } else {
            FORMAT_PCM
        }
    }

    fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// Header for a data chunk of `data_len` bytes.
    pub fn header(&self, data_len: u32) -> [u8; WAV_HEADER_LEN] {
        let mut h = [0u8; WAV_HEADER_LEN];
        h[0..4].copy_from_slice(b"RIFF");
        h[4..8].copy_from_slice(&(36 + data_len).to_le_bytes());
        h[8..12].copy_from_slice(b"WAVE");

        h[12..16].copy_from_slice(b"fmt ");
        h[16..20].copy_from_slice(&16u32.to_le_bytes());
        h[20..22].copy_from_slice(&self.audio_format().to_le_bytes());
        h[22..24].copy_from_slice(&self.channels.to_le_bytes());
        h[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        h[28..32].copy_from_slice(&self.byte_rate().to_le_bytes());
        h[32..34].copy_from_slice(&self.block_align().to_le_bytes());
        h[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());

        h[36..40].copy_from_slice(b"data");
        h[40..44].copy_from_slice(&data_len.to_le_bytes());
        h
    }
}

/// Writes a complete WAV file to a writer.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    writer.write_all(&format.header(pcm_data.len() as u32))?;
    writer.write_all(pcm_data)
}

/// Returns a complete WAV file as bytes.
pub fn wav_bytes(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(WAV_HEADER_LEN + pcm_data.len());
    out.extend_from_slice(&format.header(pcm_data.len() as u32));
    out.extend_from_slice(pcm_data);
    out
}

/// BLAKE3 hex digest of PCM bytes.
pub fn pcm_hash(pcm_data: &[u8]) -> String {
    blake3::hash(pcm_data).to_hex().to_string()
}

/// Rendered WAV file plus its identifying hash.
#[derive(Debug)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM data only.
    pub pcm_hash: String,
    pub format: WavFormat,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Packs the first `frames` samples of `ctx`.
    pub fn from_context(ctx: &SynthContext, frames: usize) -> Self {
        let format = WavFormat::for_context(ctx);
        let pcm = ctx.pcm_bytes(frames);
        Self {
            wav_data: wav_bytes(&format, &pcm),
            pcm_hash: pcm_hash(&pcm),
            format,
            num_samples: pcm.len() / format.block_align() as usize,
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.format.sample_rate as f64
    }
}

/// Writes the first `frames` samples of `ctx` to a WAV file at `path`.
pub fn save_wav(ctx: &SynthContext, frames: usize, path: impl AsRef<Path>) -> SfxResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SfxError::file_open(path, e))?;
    let mut writer = BufWriter::new(file);
    let format = WavFormat::for_context(ctx);
    write_wav(&mut writer, &format, &ctx.pcm_bytes(frames))
        .and_then(|()| writer.flush())
        .map_err(SfxError::FileWrite)?;
    tracing::debug!(path = %path.display(), frames, "wrote wav");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterSet;
    use crate::rng::PcgSource;
    use crate::synth::SynthConfig;

    fn small_context(format: SampleFormat) -> SynthContext {
        SynthContext::new(SynthConfig {
            sample_format: format,
            sample_rate: 22050,
            max_duration_seconds: 2,
        })
        .unwrap()
    }

    #[test]
    fn test_wav_format() {
        let mono = WavFormat::mono(44100, SampleFormat::I16);
        assert_eq!(mono.channels, 1);
        assert_eq!(mono.byte_rate(), 88200);
        assert_eq!(mono.block_align(), 2);
        assert_eq!(mono.audio_format(), 1);

        let float = WavFormat::mono(44100, SampleFormat::F32);
        assert_eq!(float.byte_rate(), 176400);
        assert_eq!(float.audio_format(), 3);

        let byte = WavFormat::mono(8000, SampleFormat::U8);
        assert_eq!(byte.block_align(), 1);
        assert_eq!(byte.audio_format(), 1);
    }

    #[test]
    fn test_header_layout() {
        let wav = wav_bytes(&WavFormat::mono(44100, SampleFormat::I16), &[0u8; 200]);
        assert_eq!(wav.len(), 244);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 236);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 200);
    }

    #[test]
    fn test_write_wav_matches_wav_bytes() {
        let format = WavFormat::mono(22050, SampleFormat::U8);
        let pcm = [128u8, 130, 126, 128];
        let mut streamed = Vec::new();
        write_wav(&mut streamed, &format, &pcm).unwrap();
        assert_eq!(streamed, wav_bytes(&format, &pcm));
    }

    #[test]
    fn test_wav_result_from_context() {
        let mut ctx = small_context(SampleFormat::I16);
        let frames = ctx.generate(&ParameterSet::default(), &mut PcgSource::new(1));
        let result = WavResult::from_context(&ctx, frames);

        assert_eq!(result.num_samples, frames);
        assert_eq!(result.wav_data.len(), WAV_HEADER_LEN + frames * 2);
        assert_eq!(result.pcm_hash.len(), 64);
        assert_eq!(result.pcm_hash, pcm_hash(&ctx.pcm_bytes(frames)));
        assert!((result.duration_seconds() - frames as f64 / 22050.0).abs() < 1e-9);
    }

    #[test]
    fn test_save_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let mut ctx = small_context(SampleFormat::F32);
        let frames = ctx.generate(&ParameterSet::default(), &mut PcgSource::new(1));
        save_wav(&ctx, frames, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), WAV_HEADER_LEN + frames * 4);
        assert_eq!(u16::from_le_bytes([bytes[20], bytes[21]]), 3);
    }
}
