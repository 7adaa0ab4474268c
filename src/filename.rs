const ILLEGAL_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

pub fn sanitize_filename(name: &str) -> String {
    name.chars().filter(|c| !ILLEGAL_CHARS.contains(c)).collect()
}

/// `"{title} ({id}).{ext}"`, with `_cleaned` before the extension for the
/// cleaned variant.
pub fn build_safe_filename(title: &str, video_id: &str, extension: &str, cleaned: bool) -> String {
    let base = format!("{title} ({video_id})");
    if cleaned {
        format!("{base}_cleaned.{extension}")
    } else {
        format!("{base}.{extension}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_illegal_characters() {
        assert_eq!(sanitize_filename("My: Video"), "My Video");
        assert_eq!(
            sanitize_filename(r#"a\b/c*d?e:f"g<h>i|j"#),
            "abcdefghij"
        );
        assert_eq!(sanitize_filename("Plain title (2024)"), "Plain title (2024)");
    }

    #[test]
    fn test_build_filename() {
        let title = sanitize_filename("My: Video");
        assert_eq!(
            build_safe_filename(&title, "abc123", "srt", false),
            "My Video (abc123).srt"
        );
    }

    #[test]
    fn test_build_cleaned_filename() {
        assert_eq!(
            build_safe_filename("Talk", "dQw4w9WgXcQ", "txt", true),
            "Talk (dQw4w9WgXcQ)_cleaned.txt"
        );
    }
}
