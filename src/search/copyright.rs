//! Heuristic for whether a video may be offered for download.

/// Phrases uploaders use to mark a track as free to reuse.
pub const FREE_USE_PHRASES: [&str; 5] = [
    "no copyright",
    "royalty free",
    "copyright free",
    "free to use",
    "public domain",
];

/// `true` when the title, description or channel name announces the track
/// as free to reuse. Case-insensitive substring match.
pub fn is_copyright_free(title: &str, description: &str, channel: &str) -> bool {
    let text = format!("{title} {description} {channel}").to_lowercase();
    FREE_USE_PHRASES.iter().any(|phrase| text.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_phrase_in_any_field() {
        assert!(is_copyright_free("Chill Beats [No Copyright]", "", "Someone"));
        assert!(is_copyright_free("Track", "All music here is ROYALTY FREE.", "Someone"));
        assert!(is_copyright_free("Track", "", "Public Domain Archive"));
    }

    #[test]
    fn ordinary_upload_is_not_free() {
        assert!(!is_copyright_free(
            "Artist - Song (Official Video)",
            "Stream the new album now",
            "ArtistVEVO"
        ));
    }

    #[test]
    fn phrase_may_straddle_fields() {
        // Fields are joined with a space before matching.
        assert!(is_copyright_free("Lofi no", "copyright", ""));
    }
}
