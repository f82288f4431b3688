//! Serve label vocabulary and per-segment label resolution.
//!
//! 9-class scheme: serve type (flat/slice/kick) crossed with defect category
//! (good mechanics / low toss / low racket speed). Matching is case-sensitive
//! and exact; anything outside the vocabulary or its display aliases is
//! invalid and excluded from the vote.

/// All valid serve labels, in canonical token form.
pub const SERVE_LABELS: [&str; 9] = [
    "flat_good_mechanics",
    "flat_low_toss",
    "flat_low_racket_speed",
    "slice_good_mechanics",
    "slice_low_toss",
    "slice_low_racket_speed",
    "kick_good_mechanics",
    "kick_low_toss",
    "kick_low_racket_speed",
];

/// Human-readable display names, as shown by the labeling UI.
const DISPLAY_NAMES: [(&str, &str); 9] = [
    ("flat_good_mechanics", "Flat – Good Mechanics"),
    ("flat_low_toss", "Flat – Low Toss"),
    ("flat_low_racket_speed", "Flat – Low Racket Speed"),
    ("slice_good_mechanics", "Slice – Good Mechanics"),
    ("slice_low_toss", "Slice – Low Toss"),
    ("slice_low_racket_speed", "Slice – Low Racket Speed"),
    ("kick_good_mechanics", "Kick – Good Mechanics"),
    ("kick_low_toss", "Kick – Low Toss"),
    ("kick_low_racket_speed", "Kick – Low Racket Speed"),
];

/// Display name for a canonical token; unknown tokens pass through unchanged.
pub fn display_name(label: &str) -> &str {
    DISPLAY_NAMES
        .iter()
        .find(|(token, _)| *token == label)
        .map(|(_, display)| *display)
        .unwrap_or(label)
}

/// Maps a display name back to its canonical token; anything else passes
/// through unchanged.
pub fn normalize(label: &str) -> &str {
    DISPLAY_NAMES
        .iter()
        .find(|(_, display)| *display == label)
        .map(|(token, _)| *token)
        .unwrap_or(label)
}

/// True for a canonical token or one of the known display names.
pub fn is_valid(label: &str) -> bool {
    SERVE_LABELS.contains(&label) || DISPLAY_NAMES.iter().any(|(_, display)| *display == label)
}

/// Resolves one canonical label for a segment from its per-sample labels.
///
/// Null/empty entries are skipped, display names are normalized, and invalid
/// tokens are excluded from the vote. Majority wins; ties go to the token
/// seen first. Returns `None` when no valid label is present.
pub fn resolve(raw_labels: &[Option<String>]) -> Option<String> {
    resolve_counting(raw_labels).0
}

/// Like [`resolve`], but also reports how many invalid tokens were excluded
/// so the caller can log them as warnings.
pub fn resolve_counting(raw_labels: &[Option<String>]) -> (Option<String>, usize) {
    // First-seen order matters for the tie-break, so tally into a Vec.
    let mut tally: Vec<(&str, usize)> = Vec::new();
    let mut invalid = 0usize;

    for raw in raw_labels {
        let Some(raw) = raw.as_deref() else { continue };
        if raw.is_empty() {
            continue;
        }
        let token = normalize(raw);
        if !SERVE_LABELS.contains(&token) {
            invalid += 1;
            continue;
        }
        match tally.iter_mut().find(|(seen, _)| *seen == token) {
            Some((_, count)) => *count += 1,
            None => tally.push((token, 1)),
        }
    }

    let mut winner: Option<(&str, usize)> = None;
    for (token, count) in tally {
        match winner {
            // Strictly greater keeps the first-seen token on ties.
            Some((_, best)) if count <= best => {}
            _ => winner = Some((token, count)),
        }
    }

    (winner.map(|(token, _)| token.to_string()), invalid)
}
