//! Turning folder names into output file stems.

/// Stem used when a folder name sanitizes to nothing.
pub const FALLBACK_STEM: &str = "grid";

const NAME_MAX: usize = 255;

/// Sanitizes a folder name for use as a file stem.
///
/// - Replaces NUL, `/`, `\`, control characters and whitespace with `_`
/// - Collapses consecutive underscores
/// - Limits length to 255 bytes
/// - Trims leading/trailing dots and underscores left after the cut
pub fn sanitize_file_stem(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let unsafe_char =
            c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace();
        if unsafe_char || c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let mut take = out.len().min(NAME_MAX);
    while !out.is_char_boundary(take) {
        take -= 1;
    }
    let stem = out[..take].trim_matches(|c| c == '.' || c == '_');

    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(sanitize_file_stem("1388_12_Наклейки 3-D_3"), "1388_12_Наклейки_3-D_3");
        assert_eq!(sanitize_file_stem("photos"), "photos");
    }

    #[test]
    fn replaces_separators() {
        assert_eq!(sanitize_file_stem("a/b\\c"), "a_b_c");
    }

    #[test]
    fn trims_and_collapses() {
        assert_eq!(sanitize_file_stem("  ..  set  ..  "), "set");
        assert_eq!(sanitize_file_stem("x___y"), "x_y");
        assert_eq!(sanitize_file_stem("x\0\ty"), "x_y");
    }

    #[test]
    fn empty_and_dots_fall_back() {
        assert_eq!(sanitize_file_stem(""), FALLBACK_STEM);
        assert_eq!(sanitize_file_stem(".."), FALLBACK_STEM);
        assert_eq!(sanitize_file_stem(" . "), FALLBACK_STEM);
    }

    #[test]
    fn truncates_on_char_boundary() {
        let long = "я".repeat(200);
        let stem = sanitize_file_stem(&long);
        assert!(stem.len() <= 255);
        assert_eq!(stem.chars().count(), 127);
    }

    #[test]
    fn cut_never_leaves_trailing_dot() {
        let long = format!("{}.bbb", "a".repeat(254));
        let stem = sanitize_file_stem(&long);
        assert_eq!(stem, "a".repeat(254));
        assert!(!stem.ends_with('.'));
    }

    #[test]
    fn cut_inside_underscore_run_is_trimmed() {
        let long = format!("{} tail", "b".repeat(254));
        assert_eq!(sanitize_file_stem(&long), "b".repeat(254));
    }
}
