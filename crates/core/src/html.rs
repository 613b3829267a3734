/// Escapes text for interpolation into HTML body or attribute positions.
pub fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }
    output
}

/// Renders user text as paragraphs: blank lines split paragraphs, single
/// newlines become `<br>`. The input is escaped before any markup is added.
pub fn format_content(input: &str) -> String {
    let escaped = escape_html(input);
    let mut output = String::with_capacity(escaped.len());
    for paragraph in split_paragraphs(&escaped) {
        let trimmed = paragraph.trim();
        if trimmed.is_empty() {
            continue;
        }
        output.push_str("<p>");
        output.push_str(&trimmed.replace('\n', "<br>"));
        output.push_str("</p>");
    }
    output
}

/// Truncates to at most `max_chars` characters, appending an ellipsis when
/// anything was cut.
pub fn preview(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut output: String = value.chars().take(max_chars).collect();
    output.push_str("...");
    output
}

fn split_paragraphs(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let bytes = input.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'\n' && idx + 1 < bytes.len() && bytes[idx + 1] == b'\n' {
            parts.push(&input[start..idx]);
            while idx < bytes.len() && bytes[idx] == b'\n' {
                idx += 1;
            }
            start = idx;
        } else {
            idx += 1;
        }
    }
    if start < input.len() {
        parts.push(&input[start..]);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::{escape_html, format_content, preview};

    #[test]
    fn escape_html_neutralizes_markup() {
        let escaped = escape_html("<script>alert('x & y')</script>");
        assert!(!escaped.contains("<script>"));
        assert_eq!(
            escaped,
            "&lt;script&gt;alert(&#39;x &amp; y&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn escape_html_leaves_plain_text_alone() {
        assert_eq!(escape_html("hello world"), "hello world");
    }

    #[test]
    fn format_content_splits_paragraphs() {
        assert_eq!(
            format_content("first\n\nsecond\nline"),
            "<p>first</p><p>second<br>line</p>"
        );
    }

    #[test]
    fn format_content_drops_empty_paragraphs() {
        assert_eq!(format_content("a\n\n\n\nb"), "<p>a</p><p>b</p>");
        assert_eq!(format_content(""), "");
    }

    #[test]
    fn format_content_escapes_before_formatting() {
        let rendered = format_content("safe\n\n<script>bad</script>");
        assert!(!rendered.contains("<script>"));
        assert!(rendered.contains("&lt;script&gt;"));
    }

    #[test]
    fn preview_truncates_long_values() {
        assert_eq!(preview("abcdef", 4), "abcd...");
        assert_eq!(preview("abc", 4), "abc");
    }
}
