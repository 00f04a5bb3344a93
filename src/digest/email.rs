//! HTML email rendering for the weekly digest.

use chrono::NaiveDate;

use crate::core::models::Article;

/// Body sent when the search returned nothing.
pub const NO_NEWS_MESSAGE: &str = "No significant fraud news found this week.";

const HEADER: &str = r#"
    <html>
    <head></head>
    <body style="font-family: Arial, sans-serif;">
        <h2>Weekly Fraud &amp; Security News Digest</h2>
        <p>Here are the top stories from the past week:</p>
    "#;

const FOOTER: &str =
    "<p><em>Automated digest by your friendly Givi-bot.</em></p></body></html>";

/// Escapes the five HTML-significant characters.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Renders the digest as an HTML document, one paragraph per article.
#[must_use]
pub fn format_digest_for_email(articles: &[Article]) -> String {
    if articles.is_empty() {
        return NO_NEWS_MESSAGE.to_string();
    }

    let mut html_body = String::from(HEADER);
    for article in articles {
        html_body.push_str(&format!(
            "<p><strong><a href=\"{}\">{}</a></strong><br><small>Source: {}</small></p>",
            escape_html(&article.url),
            escape_html(&article.title),
            escape_html(&article.source.name),
        ));
    }
    html_body.push_str(FOOTER);
    html_body
}

#[must_use]
pub fn email_subject(date: NaiveDate) -> String {
    format!(
        "Your Weekly Fraud News Digest - {}",
        date.format("%Y-%m-%d")
    )
}

/// Plain-text alternative for clients that do not render HTML.
#[must_use]
pub fn plain_text_alternative(html: &str) -> String {
    html2text::from_read(html.as_bytes(), 80).unwrap_or_else(|_| html.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn subject_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            email_subject(date),
            "Your Weekly Fraud News Digest - 2024-03-09"
        );
    }
}
