//! Synth context: the preallocated output buffer plus per-generation scratch.

use std::fmt;
use std::str::FromStr;

use crate::error::{SfxError, SfxResult};
use crate::params::ParameterSet;
use crate::rng::RandomSource;

use super::generate::{generate_with_report, GenerateReport};
use super::noise::NoiseTable;
use super::phaser::PhaserRing;

/// Sample rate every parameter curve is tuned for.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Longest sound the default context can hold, in seconds.
pub const DEFAULT_MAX_DURATION: u32 = 10;

/// Output sample representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleFormat {
    /// Unsigned 8-bit, centered on 128.
    U8,
    /// Signed 16-bit.
    #[default]
    I16,
    /// 32-bit float in [-1, 1].
    F32,
}

impl SampleFormat {
    /// Bits per stored sample.
    pub fn bits_per_sample(self) -> u16 {
        match self {
            SampleFormat::U8 => 8,
            SampleFormat::I16 => 16,
            SampleFormat::F32 => 32,
        }
    }

    /// Bytes per stored sample.
    pub fn bytes_per_sample(self) -> usize {
        self.bits_per_sample() as usize / 8
    }

    /// Lowercase name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            SampleFormat::U8 => "u8",
            SampleFormat::I16 => "i16",
            SampleFormat::F32 => "f32",
        }
    }

    /// Quantizes a sample in [-1, 1].
    #[inline]
    pub fn quantize_u8(sample: f32) -> u8 {
        (sample * 127.0 + 128.0) as u8
    }

    /// Quantizes a sample in [-1, 1].
    #[inline]
    pub fn quantize_i16(sample: f32) -> i16 {
        (sample * 32767.0) as i16
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "u8" => Ok(SampleFormat::U8),
            "i16" => Ok(SampleFormat::I16),
            "f32" => Ok(SampleFormat::F32),
            other => Err(format!("unknown sample format: {} (expected u8, i16 or f32)", other)),
        }
    }
}

/// Allocation parameters for a [`SynthContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthConfig {
    /// Output sample representation.
    pub sample_format: SampleFormat,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Buffer length in seconds.
    pub max_duration_seconds: u32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_format: SampleFormat::I16,
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_duration_seconds: DEFAULT_MAX_DURATION,
        }
    }
}

impl SynthConfig {
    /// Default rate and duration with the given format.
    pub fn with_format(sample_format: SampleFormat) -> Self {
        Self {
            sample_format,
            ..Self::default()
        }
    }

    /// Buffer capacity in samples.
    pub fn capacity(&self) -> u64 {
        self.sample_rate as u64 * self.max_duration_seconds as u64
    }
}

/// Owned sample storage in the selected format.
#[derive(Debug, Clone)]
pub enum SampleBuffer {
    U8(Vec<u8>),
    I16(Vec<i16>),
    F32(Vec<f32>),
}

impl SampleBuffer {
    fn allocate(format: SampleFormat, len: u64) -> SfxResult<Self> {
        let failure = || SfxError::AllocationFailure { samples: len };
        let n = usize::try_from(len).map_err(|_| failure())?;

        fn zeroed<T: Clone + Default>(n: usize) -> Option<Vec<T>> {
            let mut v = Vec::new();
            v.try_reserve_exact(n).ok()?;
            v.resize(n, T::default());
            Some(v)
        }

        let buffer = match format {
            SampleFormat::U8 => zeroed(n).map(SampleBuffer::U8),
            SampleFormat::I16 => zeroed(n).map(SampleBuffer::I16),
            SampleFormat::F32 => zeroed(n).map(SampleBuffer::F32),
        };
        buffer.ok_or_else(failure)
    }

    fn len(&self) -> usize {
        match self {
            SampleBuffer::U8(v) => v.len(),
            SampleBuffer::I16(v) => v.len(),
            SampleBuffer::F32(v) => v.len(),
        }
    }

    /// Stores a clamped sample at `index`.
    #[inline]
    pub(crate) fn write(&mut self, index: usize, sample: f32) {
        match self {
            SampleBuffer::U8(v) => v[index] = SampleFormat::quantize_u8(sample),
            SampleBuffer::I16(v) => v[index] = SampleFormat::quantize_i16(sample),
            SampleBuffer::F32(v) => v[index] = sample,
        }
    }
}

/// Borrowed view of produced samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Samples<'a> {
    U8(&'a [u8]),
    I16(&'a [i16]),
    F32(&'a [f32]),
}

impl Samples<'_> {
    /// Number of samples in the view.
    pub fn len(&self) -> usize {
        match self {
            Samples::U8(s) => s.len(),
            Samples::I16(s) => s.len(),
            Samples::F32(s) => s.len(),
        }
    }

    /// True if the view holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Little-endian PCM bytes, as stored in a WAVE data chunk.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            Samples::U8(s) => s.to_vec(),
            Samples::I16(s) => s.iter().flat_map(|v| v.to_le_bytes()).collect(),
            Samples::F32(s) => s.iter().flat_map(|v| v.to_le_bytes()).collect(),
        }
    }

    /// Sample `index` converted back to [-1, 1].
    pub fn get_f32(&self, index: usize) -> Option<f32> {
        match self {
            Samples::U8(s) => s.get(index).map(|&v| (v as f32 - 128.0) / 127.0),
            Samples::I16(s) => s.get(index).map(|&v| v as f32 / 32767.0),
            Samples::F32(s) => s.get(index).copied(),
        }
    }
}

/// Preallocated output buffer and scratch state for [`super::generate`].
///
/// Create one per (format, rate, duration) and reuse it; generation never
/// allocates and never writes past [`SynthContext::capacity`].
#[derive(Debug, Clone)]
pub struct SynthContext {
    config: SynthConfig,
    pub(crate) buffer: SampleBuffer,
    pub(crate) noise: NoiseTable,
    pub(crate) phaser: PhaserRing,
}

impl SynthContext {
    /// Allocates a context and its sample buffer.
    pub fn new(config: SynthConfig) -> SfxResult<Self> {
        let buffer = SampleBuffer::allocate(config.sample_format, config.capacity())?;
        tracing::debug!(
            format = %config.sample_format,
            sample_rate = config.sample_rate,
            capacity = buffer.len(),
            "allocated synth context"
        );
        Ok(Self {
            config,
            buffer,
            noise: NoiseTable::default(),
            phaser: PhaserRing::default(),
        })
    }

    /// Allocation parameters.
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Output sample representation.
    pub fn sample_format(&self) -> SampleFormat {
        self.config.sample_format
    }

    /// Output sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    /// Maximum number of samples a single generation can produce.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Reallocates the buffer for a new maximum duration.
    ///
    /// On failure the existing buffer is kept.
    pub fn resize(&mut self, max_duration_seconds: u32) -> SfxResult<()> {
        if max_duration_seconds == self.config.max_duration_seconds {
            return Ok(());
        }
        let config = SynthConfig {
            max_duration_seconds,
            ..self.config
        };
        self.buffer = SampleBuffer::allocate(config.sample_format, config.capacity())?;
        self.config = config;
        Ok(())
    }

    /// View of the whole buffer.
    pub fn samples(&self) -> Samples<'_> {
        self.frames(self.capacity())
    }

    /// View of the first `count` samples (clamped to the capacity).
    pub fn frames(&self, count: usize) -> Samples<'_> {
        let n = count.min(self.capacity());
        match &self.buffer {
            SampleBuffer::U8(v) => Samples::U8(&v[..n]),
            SampleBuffer::I16(v) => Samples::I16(&v[..n]),
            SampleBuffer::F32(v) => Samples::F32(&v[..n]),
        }
    }

    /// Little-endian PCM bytes of the first `count` samples.
    pub fn pcm_bytes(&self, count: usize) -> Vec<u8> {
        self.frames(count).to_le_bytes()
    }

    /// Synthesizes `params` into this context; returns the frame count.
    pub fn generate<R: RandomSource + ?Sized>(
        &mut self,
        params: &ParameterSet,
        rng: &mut R,
    ) -> usize {
        generate_with_report(self, params, rng).frames
    }

    /// Like [`SynthContext::generate`], also reporting why generation stopped.
    pub fn generate_with_report<R: RandomSource + ?Sized>(
        &mut self,
        params: &ParameterSet,
        rng: &mut R,
    ) -> GenerateReport {
        generate_with_report(self, params, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SynthConfig::default();
        assert_eq!(config.sample_format, SampleFormat::I16);
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.max_duration_seconds, 10);
        assert_eq!(config.capacity(), 441_000);
    }

    #[test]
    fn test_allocation_per_format() {
        for format in [SampleFormat::U8, SampleFormat::I16, SampleFormat::F32] {
            let ctx = SynthContext::new(SynthConfig {
                sample_format: format,
                sample_rate: 8000,
                max_duration_seconds: 2,
            })
            .unwrap();
            assert_eq!(ctx.capacity(), 16000);
            assert_eq!(ctx.samples().len(), 16000);
            assert_eq!(ctx.pcm_bytes(10).len(), 10 * format.bytes_per_sample());
        }
    }

    #[test]
    fn test_allocation_failure_is_reported() {
        let result = SynthContext::new(SynthConfig {
            sample_format: SampleFormat::F32,
            sample_rate: u32::MAX,
            max_duration_seconds: u32::MAX,
        });
        assert!(matches!(result, Err(SfxError::AllocationFailure { .. })));
    }

    #[test]
    fn test_resize() {
        let mut ctx = SynthContext::new(SynthConfig {
            sample_format: SampleFormat::U8,
            sample_rate: 1000,
            max_duration_seconds: 1,
        })
        .unwrap();
        assert_eq!(ctx.capacity(), 1000);
        ctx.resize(3).unwrap();
        assert_eq!(ctx.capacity(), 3000);
        assert_eq!(ctx.config().max_duration_seconds, 3);
    }

    #[test]
    fn test_quantization() {
        assert_eq!(SampleFormat::quantize_u8(0.0), 128);
        assert_eq!(SampleFormat::quantize_u8(1.0), 255);
        assert_eq!(SampleFormat::quantize_u8(-1.0), 1);
        assert_eq!(SampleFormat::quantize_i16(1.0), 32767);
        assert_eq!(SampleFormat::quantize_i16(-1.0), -32767);
        assert_eq!(SampleFormat::quantize_i16(0.0), 0);
    }

    #[test]
    fn test_frames_clamps_to_capacity() {
        let ctx = SynthContext::new(SynthConfig {
            sample_format: SampleFormat::I16,
            sample_rate: 100,
            max_duration_seconds: 1,
        })
        .unwrap();
        assert_eq!(ctx.frames(5000).len(), 100);
        assert!(ctx.frames(0).is_empty());
    }

    #[test]
    fn test_sample_format_parse() {
        assert_eq!("U8".parse::<SampleFormat>(), Ok(SampleFormat::U8));
        assert_eq!("f32".parse::<SampleFormat>(), Ok(SampleFormat::F32));
        assert!("i24".parse::<SampleFormat>().is_err());
    }
}
