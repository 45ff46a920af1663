use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::path::PathBuf;

/// Title used when neither the tags nor the file name yield one.
pub const DEFAULT_TITLE: &str = "Untitled Song";

/// Audio container extensions accepted by the file picker. Also the set
/// stripped when deriving a title from the file name.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg", "m4a", "aac"];

/// Metadata tags embedded in an audio file.
///
/// Produced once per file by the tag reader and immutable afterwards. Every
/// field is optional; files commonly carry only a subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
}

/// A playable audio source derived from a selected file's raw bytes.
///
/// Surfaced as a `data:` URL so the webview's audio element can play it
/// directly, without a local file server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioHandle {
    url: String,
}

impl AudioHandle {
    /// Encode raw audio bytes into a playable `data:` URL.
    #[must_use]
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self {
            url: format!("data:{mime};base64,{}", BASE64.encode(bytes)),
        }
    }

    /// The playable URL for this handle.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The user's current file selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedTrack {
    /// Path the file was selected from.
    pub path: PathBuf,
    /// File name component, used for title fallback and display.
    pub file_name: String,
    /// Playable audio derived from the file bytes.
    pub audio: AudioHandle,
}

/// MIME type for an audio file name, defaulting to MPEG audio.
#[must_use]
pub fn audio_mime(file_name: &str) -> &'static str {
    match extension_of(file_name) {
        Some(ext) if ext.eq_ignore_ascii_case("wav") => "audio/wav",
        Some(ext) if ext.eq_ignore_ascii_case("flac") => "audio/flac",
        Some(ext) if ext.eq_ignore_ascii_case("ogg") => "audio/ogg",
        Some(ext) if ext.eq_ignore_ascii_case("m4a") => "audio/mp4",
        Some(ext) if ext.eq_ignore_ascii_case("aac") => "audio/aac",
        _ => "audio/mpeg",
    }
}

/// Resolve the display title for a selection.
///
/// Order: the embedded title tag, then the file name with a trailing audio
/// extension stripped, then [`DEFAULT_TITLE`].
#[must_use]
pub fn resolve_title(tags: Option<&MediaTags>, file_name: &str) -> String {
    if let Some(title) = tags.and_then(|t| t.title.as_deref()) {
        let title = title.trim();
        if !title.is_empty() {
            return title.to_string();
        }
    }

    let stem = strip_audio_extension(file_name).trim();
    if stem.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        stem.to_string()
    }
}

/// Strip a trailing known audio extension from a file name, case-insensitively.
fn strip_audio_extension(file_name: &str) -> &str {
    if let Some(ext) = extension_of(file_name) {
        let known = AUDIO_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(candidate));
        if known {
            return &file_name[..file_name.len() - ext.len() - 1];
        }
    }
    file_name
}

fn extension_of(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_prefers_tag_over_file_name() {
        let tags = MediaTags {
            title: Some("Clair de Lune".to_string()),
            ..MediaTags::default()
        };
        assert_eq!(resolve_title(Some(&tags), "track01.mp3"), "Clair de Lune");
    }

    #[test]
    fn test_title_falls_back_to_stripped_file_name() {
        assert_eq!(resolve_title(None, "song.mp3"), "song");
        assert_eq!(resolve_title(None, "Song.MP3"), "Song");
        assert_eq!(resolve_title(None, "take.flac"), "take");
    }

    #[test]
    fn test_blank_tag_title_is_ignored() {
        let tags = MediaTags {
            title: Some("   ".to_string()),
            ..MediaTags::default()
        };
        assert_eq!(resolve_title(Some(&tags), "song.mp3"), "song");
    }

    #[test]
    fn test_unknown_extension_is_kept() {
        assert_eq!(resolve_title(None, "notes.txt"), "notes.txt");
    }

    #[test]
    fn test_empty_file_name_yields_default_title() {
        assert_eq!(resolve_title(None, ""), DEFAULT_TITLE);
        assert_eq!(resolve_title(None, " .mp3"), DEFAULT_TITLE);
    }

    #[test]
    fn test_dotfile_name_is_not_treated_as_extension() {
        assert_eq!(resolve_title(None, ".mp3"), ".mp3");
    }

    #[test]
    fn test_audio_handle_is_a_data_url() {
        let handle = AudioHandle::from_bytes("audio/mpeg", b"abc");
        assert_eq!(handle.url(), "data:audio/mpeg;base64,YWJj");
    }

    #[test]
    fn test_audio_mime_for_known_extensions() {
        assert_eq!(audio_mime("a.mp3"), "audio/mpeg");
        assert_eq!(audio_mime("a.WAV"), "audio/wav");
        assert_eq!(audio_mime("a.ogg"), "audio/ogg");
        assert_eq!(audio_mime("a"), "audio/mpeg");
    }
}
