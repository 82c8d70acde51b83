//! Synthetic audio builders for tests.
//!
//! Produces MPEG-1 Layer III streams of constant bitrate (128 kbps, 44.1 kHz,
//! stereo) made of silent frames, so tests need no binary fixtures.

/// Frame header: sync, MPEG-1, Layer III, no CRC, 128 kbps, 44.1 kHz, no padding, stereo
pub const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];

/// Size of one unpadded frame at 128 kbps / 44.1 kHz: 144 * 128000 / 44100
pub const FRAME_LEN: usize = 417;

/// Number of frames covering roughly ten seconds of audio
pub const FRAMES_PER_TEN_SECONDS: usize = 384;

/// Build a CBR MP3 stream of `frames` silent frames.
pub fn synthetic_mp3(frames: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(frames * FRAME_LEN);
    for _ in 0..frames {
        data.extend_from_slice(&FRAME_HEADER);
        data.resize(data.len() + FRAME_LEN - FRAME_HEADER.len(), 0);
    }
    data
}

/// Bytes that no supported container recognizes.
pub fn not_audio() -> Vec<u8> {
    b"<!doctype html><html><body>This is not an audio file</body></html>".to_vec()
}
