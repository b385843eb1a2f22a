//! External video-reference normalization.
//!
//! Recognized YouTube-style URLs (`watch?v=ID`, `youtu.be/ID`,
//! `embed/ID`, `shorts/ID`) normalize to the canonical embed form and a
//! derived thumbnail. Anything else passes through unchanged so a pasted
//! reference never hard-fails.

use url::Url;

const ID_LEN: usize = 11;

fn is_video_id(candidate: &str) -> bool {
    candidate.len() == ID_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn host_is_youtube(host: &str) -> bool {
    host == "youtube.com" || host.ends_with(".youtube.com")
}

/// Extract the 11-character video id from a recognized reference URL.
pub fn video_id(reference: &str) -> Option<String> {
    let parsed = Url::parse(reference.trim()).ok()?;
    let host = parsed.host_str()?;

    if host == "youtu.be" {
        let candidate = parsed.path_segments()?.next()?;
        return is_video_id(candidate).then(|| candidate.to_string());
    }

    if !host_is_youtube(host) {
        return None;
    }

    let mut segments = parsed.path_segments()?;
    match segments.next()? {
        "watch" => {
            let candidate = parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())?;
            is_video_id(&candidate).then_some(candidate)
        }
        "embed" | "shorts" => {
            let candidate = segments.next()?;
            is_video_id(candidate).then(|| candidate.to_string())
        }
        _ => None,
    }
}

/// Canonical embeddable form of a reference, or the input unchanged when
/// it is not a recognized video URL.
pub fn embed_url(reference: &str) -> String {
    match video_id(reference) {
        Some(id) => format!("https://www.youtube.com/embed/{id}"),
        None => reference.to_string(),
    }
}

/// Derived thumbnail for a recognized reference.
pub fn thumbnail_url(reference: &str) -> Option<String> {
    video_id(reference).map(|id| format!("https://img.youtube.com/vi/{id}/maxresdefault.jpg"))
}
