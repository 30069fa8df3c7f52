//! Text sanitization for filenames and tag fields.
//!
//! Everything user-controllable that ends up in a path or on screen goes
//! through [`sanitize`] first: marketing noise stripped, accents folded to
//! ASCII, reserved path characters replaced, featuring credits and trailing
//! URLs removed. The output only ever contains characters from
//! `[A-Za-z0-9 .\-_\[\]()]`.

use crate::library::AudioTrack;

/// Maximum length (in characters) for a sanitized filename.
pub const NAME_MAX: usize = 256;
/// Maximum length for sanitized artist / album / title fields.
pub const FIELD_MAX: usize = 128;
/// Hard cap applied to filenames under `--limit-name` / `--car-safe`.
pub const LIMITED_NAME_MAX: usize = 64;

/// Noise substrings removed verbatim, repeatedly, before the char scan.
const NOISE_PATTERNS: &[&str] = &["(Official Video)", "[HD]", "(Visualizer)"];

/// Characters the filesystem (or a head unit) may choke on.
const RESERVED: &str = "<>:\\|?*\"";

/// Non-alphanumeric characters allowed through.
const PERMITTED: &str = " .-_[]()";

fn fold_accent(c: char) -> Option<char> {
    Some(match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        _ => return None,
    })
}

fn strip_noise(input: &str) -> String {
    let mut out = input.to_string();
    for pat in NOISE_PATTERNS {
        while let Some(pos) = out.find(pat) {
            out.replace_range(pos..pos + pat.len(), "");
        }
    }
    out
}

/// Exact prefix match at an offset into a char slice.
fn starts_with_at(chars: &[char], at: usize, prefix: &str) -> bool {
    let mut it = chars[at..].iter();
    prefix.chars().all(|p| it.next() == Some(&p))
}

/// Case-insensitive ASCII prefix match at an offset into a char slice.
fn starts_with_at_ignore_case(chars: &[char], at: usize, prefix: &str) -> bool {
    let mut it = chars[at..].iter();
    prefix
        .chars()
        .all(|p| it.next().is_some_and(|c| c.eq_ignore_ascii_case(&p)))
}

/// Sanitize one string. `max_len` caps the output length in characters;
/// truncation happens on a `char` boundary, so a multi-byte character that
/// straddles the limit is dropped whole (known limitation).
pub fn sanitize(input: &str, max_len: usize) -> String {
    let stripped = strip_noise(input);
    let chars: Vec<char> = stripped.chars().collect();
    let mut out = String::with_capacity(stripped.len());

    let mut i = 0;
    while i < chars.len() {
        let mut c = chars[i];

        if !c.is_ascii() {
            if let Some(folded) = fold_accent(c) {
                out.push(folded);
            }
            i += 1;
            continue;
        }
        if (c as u32) < 32 {
            i += 1;
            continue;
        }
        if RESERVED.contains(c) {
            c = '_';
        }
        // Featuring credits are removed wholesale: the literal "(ft." token
        // and everything through the closing paren.
        if c == '(' && starts_with_at(&chars, i, "(ft.") {
            while i < chars.len() && chars[i] != ')' {
                i += 1;
            }
            i += 1;
            continue;
        }
        // A pasted URL ends the name right there.
        if starts_with_at_ignore_case(&chars, i, "http") {
            break;
        }
        if c.is_ascii_alphanumeric() || PERMITTED.contains(c) {
            out.push(c);
        }
        i += 1;
    }

    let trimmed = out.trim_end();
    if trimmed.len() < out.len() {
        out.truncate(trimmed.len());
    }
    if out.chars().count() > max_len {
        out = out.chars().take(max_len).collect();
    }
    out
}

/// Sanitize every user-facing text field on a track, in place.
pub fn sanitize_track(t: &mut AudioTrack, limit_name: bool) {
    t.filename = sanitize(&t.filename, NAME_MAX);
    t.artist = sanitize(&t.artist, FIELD_MAX);
    t.album = sanitize(&t.album, FIELD_MAX);
    t.title = sanitize(&t.title, FIELD_MAX);
    if limit_name && t.filename.chars().count() > LIMITED_NAME_MAX {
        t.filename = t.filename.chars().take(LIMITED_NAME_MAX).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_noise_patterns_everywhere() {
        assert_eq!(
            sanitize("Song (Official Video) [HD]", NAME_MAX),
            "Song"
        );
        assert_eq!(
            sanitize("[HD][HD]Song(Visualizer)", NAME_MAX),
            "Song"
        );
    }

    #[test]
    fn folds_accents_and_drops_unmapped_non_ascii() {
        assert_eq!(sanitize("Beyoncé", NAME_MAX), "Beyonce");
        assert_eq!(sanitize("Señorita à là çarte", NAME_MAX), "Senorita a la carte");
        // No mapping for CJK or emoji: dropped.
        assert_eq!(sanitize("Song 音楽 🎵", NAME_MAX), "Song");
    }

    #[test]
    fn replaces_reserved_path_characters() {
        assert_eq!(sanitize("a<b>c:d|e?f*g\"h", NAME_MAX), "a_b_c_d_e_f_g_h");
        assert_eq!(sanitize("back\\slash", NAME_MAX), "back_slash");
    }

    #[test]
    fn drops_control_characters() {
        assert_eq!(sanitize("a\tb\nc\x01d", NAME_MAX), "abcd");
    }

    #[test]
    fn removes_featuring_parenthetical_wholesale() {
        assert_eq!(
            sanitize("One More Time (ft. Romanthony).mp3", NAME_MAX),
            "One More Time .mp3"
        );
        // Other parentheticals survive.
        assert_eq!(sanitize("Track (Live)", NAME_MAX), "Track (Live)");
    }

    #[test]
    fn featuring_match_is_case_sensitive() {
        // Only the lowercase token is a featuring credit.
        assert_eq!(
            sanitize("Song (FT. Nobody)", NAME_MAX),
            "Song (FT. Nobody)"
        );
        assert_eq!(sanitize("Song (Ft. Nobody)", NAME_MAX), "Song (Ft. Nobody)");
        assert_eq!(sanitize("Song (ft. Nobody)", NAME_MAX), "Song");
    }

    #[test]
    fn truncates_at_embedded_urls() {
        assert_eq!(
            sanitize("Song name https://example.com/watch", NAME_MAX),
            "Song name"
        );
        assert_eq!(sanitize("HTTP://host/file", NAME_MAX), "");
        assert_eq!(sanitize("HtTp starts here too", NAME_MAX), "");
    }

    #[test]
    fn trims_trailing_whitespace_and_caps_length() {
        assert_eq!(sanitize("abc   ", NAME_MAX), "abc");
        assert_eq!(sanitize("abcdefgh", 4), "abcd");
    }

    #[test]
    fn output_stays_in_the_permitted_set() {
        let out = sanitize("Wëird: náme? (ft. X) [remix] @#%&=+;,'`~^{}", NAME_MAX);
        assert!(
            out.chars().all(|c| c.is_ascii_alphanumeric() || " .-_[]()".contains(c)),
            "unexpected char in {out:?}"
        );
    }

    #[test]
    fn sanitize_track_limits_filename_when_asked() {
        let mut t = AudioTrack::default();
        t.filename = "x".repeat(100);
        t.artist = "Beyoncé".into();
        sanitize_track(&mut t, true);
        assert_eq!(t.filename.len(), LIMITED_NAME_MAX);
        assert_eq!(t.artist, "Beyonce");
    }
}
