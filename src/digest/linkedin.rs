use serde_json::{Value, json};

use crate::core::models::Article;

/// How many stories make it into the social post.
pub const LINKEDIN_ARTICLE_LIMIT: usize = 2;

pub const LINKEDIN_HASHTAGS: &str =
    "#FraudPrevention #CyberSecurity #Fintech #RiskManagement #SecurityNews";

/// Short post covering the top stories, or `None` when there is nothing to share.
#[must_use]
pub fn format_digest_for_linkedin(articles: &[Article]) -> Option<String> {
    if articles.is_empty() {
        return None;
    }

    let mut post_text = String::from("This week's top fraud & security updates:\n\n");
    for article in articles.iter().take(LINKEDIN_ARTICLE_LIMIT) {
        post_text.push_str(&format!("➡️ {}\n{}\n\n", article.title, article.url));
    }
    post_text.push_str(LINKEDIN_HASHTAGS);
    Some(post_text)
}

/// UGC share payload for a public text-only post.
#[must_use]
pub fn build_ugc_post_payload(author_urn: &str, post_text: &str) -> Value {
    json!({
        "author": author_urn,
        "lifecycleState": "PUBLISHED",
        "specificContent": {
            "com.linkedin.ugc.ShareContent": {
                "shareCommentary": {
                    "text": post_text
                },
                "shareMediaCategory": "NONE"
            }
        },
        "visibility": {
            "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC"
        }
    })
}
