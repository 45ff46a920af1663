//! Embedded tag extraction from audio containers.

use crate::error::{CoreError, Result};
use crate::track::MediaTags;
use std::fs::File;
use std::path::Path;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::{MetadataOptions, MetadataRevision, StandardTagKey};
use symphonia::core::probe::Hint;
use tracing::debug;

const LOG_TARGET: &str = "songscape::tags";

/// Read embedded metadata tags from an audio file.
///
/// Probes the container without decoding any audio. Callers treat failure as
/// non-fatal: a file with unreadable tags still plays, it just falls back to
/// a file-name-derived title.
///
/// # Errors
///
/// Returns [`CoreError::TagRead`] if the file cannot be opened or the
/// container cannot be probed.
pub fn read_tags(path: &Path) -> Result<MediaTags> {
    let file = File::open(path).map_err(|e| CoreError::TagRead {
        reason: e.to_string(),
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let mut probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| CoreError::TagRead {
            reason: e.to_string(),
        })?;

    let mut tags = MediaTags::default();

    // ID3v2 tags are attached at the probe level for mp3 containers.
    if let Some(mut metadata) = probed.metadata.get() {
        if let Some(revision) = metadata.skip_to_latest() {
            apply_revision(&mut tags, revision);
        }
    }

    // Container-level metadata (e.g. vorbis comments) lives on the format reader.
    let format_metadata = probed.format.metadata();
    if let Some(revision) = format_metadata.current() {
        apply_revision(&mut tags, revision);
    }

    debug!(
        target: LOG_TARGET,
        "Read tags from {:?}: title={:?}, artist={:?}",
        path.file_name(),
        tags.title,
        tags.artist
    );

    Ok(tags)
}

/// Fold a metadata revision into `tags`, keeping the first non-empty value
/// seen for each field.
fn apply_revision(tags: &mut MediaTags, revision: &MetadataRevision) {
    for tag in revision.tags() {
        let value = tag.value.to_string();
        if value.trim().is_empty() {
            continue;
        }
        match tag.std_key {
            Some(StandardTagKey::TrackTitle) => {
                tags.title.get_or_insert(value);
            }
            Some(StandardTagKey::Artist) => {
                tags.artist.get_or_insert(value);
            }
            Some(StandardTagKey::Album) => {
                tags.album.get_or_insert(value);
            }
            Some(StandardTagKey::Date | StandardTagKey::ReleaseDate) => {
                tags.year.get_or_insert(value);
            }
            Some(StandardTagKey::Genre) => {
                tags.genre.get_or_insert(value);
            }
            _ => {}
        }
    }
}
