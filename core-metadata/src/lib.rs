//! # Metadata Module
//!
//! Extracts structural metadata from in-memory audio files.
//!
//! ## Overview
//!
//! This module handles:
//! - Container detection (MPEG, FLAC, MP4, Ogg, WAV, ...)
//! - Audio property extraction: duration, bitrate, sample rate, channels
//!
//! Tags and artwork are never read; callers only need the stream properties.

pub mod error;
pub mod extractor;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use error::{MetadataError, Result};
pub use extractor::{AudioProperties, MetadataExtractor};
