//! MIME types for the audio formats the API accepts on upload.

use std::path::Path;

use crate::error::ApiError;

/// Supported audio extensions and their MIME types.
pub const AUDIO_MIME_TYPES: [(&str, &str); 6] = [
    ("aac", "video/mp4"),
    ("aiff", "audio/x-aiff"),
    ("flac", "audio/flac"),
    ("mp3", "audio/mpeg"),
    ("ogg", "audio/ogg"),
    ("wav", "audio/x-wav"),
];

/// Resolve a bare, case-sensitive extension (`mp3`, not `.mp3` or `MP3`).
pub fn audio_mime_type(extension: &str) -> Result<&'static str, ApiError> {
    AUDIO_MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
        .ok_or_else(|| ApiError::UnsupportedAudioFormat(extension.to_string()))
}

/// Resolve the MIME type of an audio file from its extension.
pub fn audio_mime_type_for_path(path: &Path) -> Result<&'static str, ApiError> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    audio_mime_type(extension)
}
