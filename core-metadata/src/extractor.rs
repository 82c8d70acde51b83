//! Audio Property Extraction
//!
//! This module extracts stream properties from an audio file held in memory,
//! using the `lofty` crate. It supports MPEG (MP1/2/3), FLAC, MP4/AAC, Ogg
//! Vorbis/Opus/Speex, WAV, AIFF, APE, Musepack and WavPack.
//!
//! ## Overview
//!
//! - Detects the container from the leading bytes, not from a file name
//! - Reads duration, bitrate, sample rate and channel count
//! - Reports an absent duration as `None` rather than zero
//!
//! ## Usage
//!
//! ```ignore
//! use core_metadata::extractor::MetadataExtractor;
//!
//! let extractor = MetadataExtractor::new();
//! let properties = extractor.extract_from_bytes(&bytes)?;
//!
//! println!("Format: {}", properties.format);
//! println!("Duration: {:?}", properties.duration);
//! ```

use lofty::config::ParseOptions;
use lofty::file::{AudioFile, FileType};
use lofty::probe::Probe;
use std::io::Cursor;
use std::time::Duration;
use tracing::debug;

use crate::error::{MetadataError, Result};

/// Stream properties of an audio file
#[derive(Debug, Clone, PartialEq)]
pub struct AudioProperties {
    /// Playback duration, `None` when the container does not reveal it
    pub duration: Option<Duration>,
    /// Container format (e.g., "Mpeg", "Flac", "Mp4")
    pub format: String,
    /// MIME type derived from the container
    pub mime_type: String,
    /// Audio bitrate in kbps
    pub bitrate: Option<u32>,
    /// Sample rate in Hz
    pub sample_rate: Option<u32>,
    /// Number of audio channels
    pub channels: Option<u8>,
    /// Size of the parsed input in bytes
    pub byte_len: u64,
}

impl AudioProperties {
    /// Duration in fractional seconds
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }
}

/// Audio metadata extractor
///
/// Parses audio containers with `lofty`. Extraction is synchronous and
/// CPU-bound; async callers should run it on a blocking thread.
pub struct MetadataExtractor {
    /// Parse options for lofty
    parse_options: ParseOptions,
}

impl MetadataExtractor {
    /// Create a new metadata extractor with default settings
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::new(),
        }
    }

    /// Extract stream properties from an in-memory audio file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input is empty
    /// - The leading bytes match no supported container
    /// - The container is recognized but its structure cannot be parsed
    ///
    /// # Example
    ///
    /// ```ignore
    /// let extractor = MetadataExtractor::new();
    /// let properties = extractor.extract_from_bytes(&mp3_bytes)?;
    /// assert_eq!(properties.mime_type, "audio/mpeg");
    /// ```
    pub fn extract_from_bytes(&self, data: &[u8]) -> Result<AudioProperties> {
        if data.is_empty() {
            return Err(MetadataError::ExtractionFailed(
                "Input contains no data".to_string(),
            ));
        }

        debug!(bytes = data.len(), "Extracting audio properties");

        let probe = Probe::new(Cursor::new(data))
            .options(self.parse_options)
            .guess_file_type()
            .map_err(|e| MetadataError::ExtractionFailed(format!("Failed to probe file: {}", e)))?;

        let Some(file_type) = probe.file_type() else {
            return Err(MetadataError::UnsupportedFormat(
                "Unrecognized audio container".to_string(),
            ));
        };

        let tagged_file = probe
            .read()
            .map_err(|e| MetadataError::ExtractionFailed(format!("Failed to parse file: {}", e)))?;

        let properties = tagged_file.properties();
        let duration = Some(properties.duration()).filter(|d| !d.is_zero());

        let extracted = AudioProperties {
            duration,
            format: format!("{:?}", file_type),
            mime_type: Self::file_type_to_mime_type(file_type),
            bitrate: properties.audio_bitrate(),
            sample_rate: properties.sample_rate(),
            channels: properties.channels(),
            byte_len: data.len() as u64,
        };

        debug!(
            format = %extracted.format,
            duration_ms = duration.map(|d| d.as_millis() as u64),
            bitrate = extracted.bitrate,
            "Audio properties extracted"
        );

        Ok(extracted)
    }

    /// Convert lofty FileType to MIME type string
    fn file_type_to_mime_type(file_type: FileType) -> String {
        match file_type {
            FileType::Aac => "audio/aac",
            FileType::Aiff => "audio/aiff",
            FileType::Ape => "audio/ape",
            FileType::Flac => "audio/flac",
            FileType::Mpeg => "audio/mpeg",
            FileType::Mp4 => "audio/mp4",
            FileType::Mpc => "audio/musepack",
            FileType::Opus => "audio/opus",
            FileType::Vorbis => "audio/vorbis",
            FileType::Speex => "audio/speex",
            FileType::Wav => "audio/wav",
            FileType::WavPack => "audio/wavpack",
            FileType::Custom(_) | _ => "application/octet-stream",
        }
        .to_string()
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}
