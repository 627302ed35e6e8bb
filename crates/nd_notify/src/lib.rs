//! Approval notifications for generated drafts.

pub mod email;
pub mod markdown;

pub use email::{
    approval_email, generate_blog_approval_email, generate_blog_approval_text, ApprovalEmail,
    ApprovalLinks,
};
