//! Source audio decoding.
//!
//! Decodes the resolved source file (mp3/m4a/wav) with symphonia, downmixes
//! to mono, and resamples to 16kHz so the rest of the pipeline only ever
//! sees one sample layout.

use crate::audio::AudioClip;
use crate::defaults::SAMPLE_RATE;
use crate::error::{ChunkscribeError, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode an audio file into a 16kHz mono clip.
///
/// # Errors
/// Returns `ChunkscribeError::Decode` when the container cannot be probed,
/// no audio track is present, or decoding fails mid-stream.
pub fn decode_file(path: &Path) -> Result<AudioClip> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    // The file extension helps the probe pick the right format reader.
    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| ChunkscribeError::Decode {
            message: format!("unrecognized container format: {}", e),
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| ChunkscribeError::Decode {
            message: "no decodable audio track found".to_string(),
        })?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| ChunkscribeError::Decode {
            message: format!("failed to create decoder: {}", e),
        })?;

    let source_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| ChunkscribeError::Decode {
            message: "source sample rate unknown".to_string(),
        })?;

    let mut interleaved: Vec<f32> = Vec::new();
    let mut channels = 1usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream.
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(ChunkscribeError::Decode {
                    message: format!("failed to read packet: {}", e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                channels = decoded.spec().channels.count();
                let mut sample_buf =
                    SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
                sample_buf.copy_interleaved_ref(decoded);
                interleaved.extend_from_slice(sample_buf.samples());
            }
            // Malformed frames are skippable; bail on anything else.
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("skipping malformed packet in {}: {}", path.display(), e);
            }
            Err(e) => {
                return Err(ChunkscribeError::Decode {
                    message: format!("decoder error: {}", e),
                });
            }
        }
    }

    if interleaved.is_empty() {
        return Err(ChunkscribeError::Decode {
            message: format!("no audio frames decoded from {}", path.display()),
        });
    }

    let mono = downmix(&interleaved, channels);
    let samples = resample(&to_i16(&mono), source_rate, SAMPLE_RATE);
    Ok(AudioClip::new(samples, SAMPLE_RATE))
}

/// Average interleaved channels down to mono.
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Convert normalized f32 samples to 16-bit PCM, clamping out-of-range values.
fn to_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
        .collect()
}

/// Simple linear interpolation resampling.
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_wav(path: &Path, sample_rate: u32, channels: u16, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn downmix_stereo_averages_pairs() {
        let interleaved = vec![0.2f32, 0.4, -0.5, 0.5, 1.0, 0.0];
        let mono = downmix(&interleaved, 2);
        assert_eq!(mono.len(), 3);
        assert!((mono[0] - 0.3).abs() < 1e-6);
        assert!(mono[1].abs() < 1e-6);
        assert!((mono[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn downmix_mono_is_identity() {
        let interleaved = vec![0.1f32, 0.2, 0.3];
        assert_eq!(downmix(&interleaved, 1), interleaved);
    }

    #[test]
    fn to_i16_clamps_out_of_range() {
        let converted = to_i16(&[0.0, 1.5, -1.5, 0.5]);
        assert_eq!(converted[0], 0);
        assert_eq!(converted[1], 32767);
        assert_eq!(converted[2], -32767);
        assert_eq!(converted[3], 16383);
    }

    #[test]
    fn resample_identity_same_rate() {
        let samples = vec![100i16, 200, 300, 400, 500];
        assert_eq!(resample(&samples, 16000, 16000), samples);
    }

    #[test]
    fn resample_halves_and_doubles_counts() {
        let samples = vec![1000i16; 3200];
        assert_eq!(resample(&samples, 16000, 8000).len(), 1600);
        assert_eq!(resample(&samples, 8000, 16000).len(), 6400);
    }

    #[test]
    fn resample_handles_edge_cases() {
        assert_eq!(resample(&[], 16000, 8000).len(), 0);
        let single = resample(&[100i16], 16000, 8000);
        assert_eq!(single, vec![100]);
    }

    #[test]
    fn decode_16khz_mono_wav_roundtrips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");
        let samples: Vec<i16> = (0..16000).map(|i| (i % 128) as i16).collect();
        write_wav(&path, 16000, 1, &samples);

        let clip = decode_file(&path).unwrap();
        assert_eq!(clip.sample_rate(), 16000);
        assert_eq!(clip.duration_ms(), 1000);
        // Float round-trip through the decoder may wobble by one LSB.
        assert_eq!(clip.samples().len(), samples.len());
        for (got, want) in clip.samples().iter().zip(&samples) {
            assert!((got - want).abs() <= 1, "sample {} vs {}", got, want);
        }
    }

    #[test]
    fn decode_stereo_wav_downmixes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stereo.wav");
        // Stereo frames (1000, 3000) should downmix to ~2000.
        let samples: Vec<i16> = [1000i16, 3000].repeat(1600);
        write_wav(&path, 16000, 2, &samples);

        let clip = decode_file(&path).unwrap();
        assert_eq!(clip.samples().len(), 1600);
        assert!(clip.samples().iter().all(|&s| (1990..=2010).contains(&s)));
    }

    #[test]
    fn decode_48khz_wav_resamples_to_16khz() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hi-rate.wav");
        write_wav(&path, 48000, 1, &vec![500i16; 48000]);

        let clip = decode_file(&path).unwrap();
        assert_eq!(clip.sample_rate(), 16000);
        let n = clip.samples().len();
        assert!((15900..=16100).contains(&n), "got {} samples", n);
    }

    #[test]
    fn decode_garbage_fails_with_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("noise.bin");
        std::fs::write(&path, [0u8; 512]).unwrap();

        match decode_file(&path) {
            Err(ChunkscribeError::Decode { .. }) => {}
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn decode_missing_file_is_io_error() {
        let result = decode_file(Path::new("/nonexistent/audio.mp3"));
        assert!(matches!(result, Err(ChunkscribeError::Io(_))));
    }
}
