//! Rendering of the weekly digest for each outlet

pub mod email;
pub mod linkedin;

pub use email::{email_subject, format_digest_for_email, plain_text_alternative};
pub use linkedin::{build_ugc_post_payload, format_digest_for_linkedin};
