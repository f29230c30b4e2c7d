//! Single-page HTML rendering.

use html_escape::encode_text;
use std::fmt::Write as _;

/// Values interpolated into the page.
///
/// The result section is rendered only when `answered` is set, even if the
/// answer itself is empty. An empty `error` is not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    pub question: String,
    pub answered: bool,
    pub processed: String,
    pub answer: String,
    pub raw_response: String,
    pub error: String,
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>LLM Question Answering</title>
<style>
body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
textarea { width: 100%; min-height: 6rem; }
.error { color: #b00020; border: 1px solid #b00020; padding: 0.5rem; }
pre { background: #f4f4f4; padding: 0.75rem; overflow-x: auto; }
</style>
</head>
<body>
<h1>Ask the AI tutor</h1>
"#;

pub fn render_page(ctx: &PageContext) -> String {
    let mut html = String::from(HEAD);

    let _ = write!(
        html,
        "<form method=\"post\" action=\"/\">\n\
         <label for=\"question\">Your question</label>\n\
         <textarea id=\"question\" name=\"question\" required>{}</textarea>\n\
         <button type=\"submit\">Ask</button>\n\
         </form>\n",
        encode_text(&ctx.question)
    );

    if !ctx.error.is_empty() {
        let _ = writeln!(html, "<p class=\"error\">{}</p>", encode_text(&ctx.error));
    }

    if ctx.answered {
        let _ = write!(
            html,
            "<section id=\"result\">\n\
             <h2>Original question</h2>\n<p>{}</p>\n\
             <h2>Processed question</h2>\n<p>{}</p>\n\
             <h2>Answer</h2>\n<p style=\"white-space: pre-wrap\">{}</p>\n\
             <details>\n<summary>Raw LLM response</summary>\n<pre>{}</pre>\n</details>\n\
             </section>\n",
            encode_text(&ctx.question),
            encode_text(&ctx.processed),
            encode_text(&ctx.answer),
            encode_text(&ctx.raw_response),
        );
    }

    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolated_text_is_escaped() {
        let html = render_page(&PageContext {
            question: r#"<b>"Tom" & 'Jerry'</b>"#.into(),
            answered: true,
            answer: "<script>alert(1)</script>".into(),
            ..Default::default()
        });
        assert!(html.contains(r#"&lt;b&gt;"Tom" &amp; 'Jerry'&lt;/b&gt;"#));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_empty_answer_still_renders_result() {
        let html = render_page(&PageContext {
            question: "What is Rust?".into(),
            answered: true,
            processed: "what is rust".into(),
            raw_response: "{}".into(),
            ..Default::default()
        });
        assert!(html.contains("id=\"result\""));
        assert!(html.contains("<p>what is rust</p>"));
        assert!(html.contains("<pre>{}</pre>"));
    }

    #[test]
    fn test_empty_page_has_form_only() {
        let html = render_page(&PageContext::default());
        assert!(html.contains("<form method=\"post\""));
        assert!(!html.contains("class=\"error\""));
        assert!(!html.contains("id=\"result\""));
    }

    #[test]
    fn test_error_page_keeps_question() {
        let html = render_page(&PageContext {
            question: "a < b?".into(),
            error: "Missing API key".into(),
            ..Default::default()
        });
        assert!(html.contains("<textarea id=\"question\" name=\"question\" required>a &lt; b?</textarea>"));
        assert!(html.contains("<p class=\"error\">Missing API key</p>"));
        assert!(!html.contains("id=\"result\""));
    }
}
