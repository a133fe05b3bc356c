use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};
use crate::types::NewDocument;

/// Platform ceiling on items per media group.
pub const ALBUM_LIMIT: usize = 10;

/// One attachment ready to go on the wire: decoded bytes plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub bytes: Vec<u8>,
    pub name: String,
    pub caption: Option<String>,
}

/// Splits documents into albums of at most [`ALBUM_LIMIT`] items, decoding
/// each buffer from base64. The caption, when non-empty, is attached only to
/// the last item of the last album so the platform renders it once.
///
/// Pure and idempotent: item order matches input order, albums are emitted in
/// input order, identical input yields identical output.
pub fn build_media_groups(
    documents: &[NewDocument],
    caption: Option<&str>,
) -> Result<Vec<Vec<MediaItem>>> {
    let mut groups = Vec::with_capacity(documents.len().div_ceil(ALBUM_LIMIT));

    for chunk in documents.chunks(ALBUM_LIMIT) {
        let mut group = Vec::with_capacity(chunk.len());
        for doc in chunk {
            let bytes = STANDARD.decode(&doc.buffer).map_err(|e| {
                Error::Validation(format!("document '{}' is not valid base64: {e}", doc.name))
            })?;
            group.push(MediaItem {
                bytes,
                name: doc.name.clone(),
                caption: None,
            });
        }
        groups.push(group);
    }

    if let Some(text) = caption.filter(|t| !t.is_empty()) {
        if let Some(last) = groups.last_mut().and_then(|g| g.last_mut()) {
            last.caption = Some(text.to_string());
        }
    }

    Ok(groups)
}
