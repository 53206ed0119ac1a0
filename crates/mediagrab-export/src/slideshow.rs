use std::path::{Path, PathBuf};

use mediagrab_core::{ExtractionRecord, MediaKind, MediaResult, RecordKind};
use mediagrab_extract::short_hash;

use crate::write_output;

/// Image URLs of a multi-image post, or `None` when the record is not one.
pub fn slideshow_frames(record: &ExtractionRecord) -> Option<Vec<&str>> {
    if record.error || record.kind != RecordKind::Multiple || record.medias.is_empty() {
        return None;
    }
    record
        .medias
        .iter()
        .map(|media| (media.kind == MediaKind::Image).then_some(media.url.as_str()))
        .collect()
}

/// Writes a placeholder `.mp4` listing the frames. Nothing is encoded.
pub fn write_slideshow<S: AsRef<str>>(frames: &[S], path: &Path) -> MediaResult<PathBuf> {
    let mut content = String::from("Pseudo MP4 slideshow\nFrames:\n");
    for frame in frames {
        content.push_str("- ");
        content.push_str(frame.as_ref());
        content.push('\n');
    }
    let path = write_output(path, content.as_bytes())?;
    tracing::info!(
        "created slideshow file at {} with {} frame(s)",
        path.display(),
        frames.len()
    );
    Ok(path)
}

/// One slideshow per multi-image record, named after a hash of its URL.
pub fn write_slideshows(records: &[ExtractionRecord], output_dir: &Path) -> MediaResult<Vec<PathBuf>> {
    let mut written = Vec::new();
    for record in records {
        let Some(frames) = slideshow_frames(record) else {
            continue;
        };
        let path = output_dir.join(format!("slideshow_{}.mp4", short_hash(&record.url, 12)));
        written.push(write_slideshow(frames.as_slice(), &path)?);
    }
    Ok(written)
}
