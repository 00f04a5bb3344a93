//! Outbound delivery of the rendered digest

pub mod email;
pub mod linkedin;

pub use email::{EmailSender, OutgoingEmail, SesEmailSender};
pub use linkedin::{LinkedInPoster, PostOutcome, SocialPoster};
