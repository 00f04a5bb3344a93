use fraud_digest::core::models::{Article, ArticleSource};
use fraud_digest::digest::email::NO_NEWS_MESSAGE;
use fraud_digest::digest::linkedin::LINKEDIN_HASHTAGS;
use fraud_digest::digest::{
    build_ugc_post_payload, format_digest_for_email, format_digest_for_linkedin,
    plain_text_alternative,
};

/// Tests for the digest rendering
/// These tests pin the email and post layouts recipients see.

fn article(title: &str, url: &str, source: &str) -> Article {
    Article {
        title: title.to_string(),
        url: url.to_string(),
        source: ArticleSource {
            id: None,
            name: source.to_string(),
        },
        description: None,
        published_at: None,
    }
}

fn sample_articles() -> Vec<Article> {
    vec![
        article("Card fraud surges", "https://example.com/a", "Reuters"),
        article("New AML rules", "https://example.com/b", "FT"),
        article("KYC gaps exposed", "https://example.com/c", "Wired"),
    ]
}

#[test]
fn test_email_without_articles() {
    assert_eq!(format_digest_for_email(&[]), NO_NEWS_MESSAGE);
}

#[test]
fn test_email_lists_every_article() {
    let html = format_digest_for_email(&sample_articles());

    assert!(html.contains("<h2>Weekly Fraud &amp; Security News Digest</h2>"));
    assert!(html.contains("Here are the top stories from the past week:"));
    assert!(html.contains(
        "<p><strong><a href=\"https://example.com/a\">Card fraud surges</a></strong><br><small>Source: Reuters</small></p>"
    ));
    assert!(html.contains("Source: FT"));
    assert!(html.contains("KYC gaps exposed"));
    assert!(html.ends_with(
        "<p><em>Automated digest by your friendly Givi-bot.</em></p></body></html>"
    ));
}

#[test]
fn test_email_escapes_article_fields() {
    let html = format_digest_for_email(&[article(
        "<script>alert(1)</script> & more",
        "https://example.com/?a=1&b=\"2\"",
        "R&D Weekly",
    )]);

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
    assert!(html.contains("href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\""));
    assert!(html.contains("Source: R&amp;D Weekly"));
}

#[test]
fn test_plain_text_alternative_keeps_titles() {
    let text = plain_text_alternative(&format_digest_for_email(&sample_articles()));
    assert!(text.contains("Card fraud surges"));
    assert!(text.contains("Reuters"));
    assert!(!text.contains("<p>"));
}

#[test]
fn test_linkedin_without_articles() {
    assert_eq!(format_digest_for_linkedin(&[]), None);
}

#[test]
fn test_linkedin_uses_top_two_articles() {
    let post = format_digest_for_linkedin(&sample_articles()).expect("post text");

    assert_eq!(
        post,
        format!(
            "This week's top fraud & security updates:\n\n\
             ➡️ Card fraud surges\nhttps://example.com/a\n\n\
             ➡️ New AML rules\nhttps://example.com/b\n\n\
             {LINKEDIN_HASHTAGS}"
        )
    );
    assert!(!post.contains("KYC gaps exposed"));
}

#[test]
fn test_linkedin_single_article() {
    let post = format_digest_for_linkedin(&sample_articles()[..1]).expect("post text");
    assert!(post.contains("Card fraud surges"));
    assert!(post.ends_with("#SecurityNews"));
}

#[test]
fn test_ugc_payload_shape() {
    let payload = build_ugc_post_payload("urn:li:person:abc", "hello");

    assert_eq!(payload["author"], "urn:li:person:abc");
    assert_eq!(payload["lifecycleState"], "PUBLISHED");
    let share = &payload["specificContent"]["com.linkedin.ugc.ShareContent"];
    assert_eq!(share["shareCommentary"]["text"], "hello");
    assert_eq!(share["shareMediaCategory"], "NONE");
    assert_eq!(
        payload["visibility"]["com.linkedin.ugc.MemberNetworkVisibility"],
        "PUBLIC"
    );
}
