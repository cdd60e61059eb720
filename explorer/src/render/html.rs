//! HTML escaping and the explorer page shell.

use std::borrow::Cow;

/// Page title used by the server-rendered explorer.
pub const PAGE_TITLE: &str = "Chain Explorer";

/// Escapes the five characters that matter inside HTML text and
/// double-quoted attributes. Borrows when nothing needs escaping.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Wraps `body` in a complete HTML document.
pub fn page_shell(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <script src=\"https://cdn.tailwindcss.com\"></script>\n\
         </head>\n\
         <body class=\"bg-gray-100 p-6\">\n\
         <h1 class=\"text-2xl font-bold mb-4\">{title}</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = PAGE_TITLE,
        body = body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(escape_html("abc123"), Cow::Borrowed("abc123")));
    }

    #[test]
    fn test_special_characters_are_escaped() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_page_shell_wraps_body() {
        let page = page_shell("<p>hi</p>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Chain Explorer</title>"));
        assert!(page.contains("<p>hi</p>"));
        assert!(page.trim_end().ends_with("</html>"));
    }
}
