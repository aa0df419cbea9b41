use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::meta::RouteMeta;

// ============================================================================
// Contact submissions
// ============================================================================

/// Body of `POST /api/contact-submissions`, forwarded to the CMS as-is.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactSubmission {
    #[validate(length(min = 1, max = 200, message = "Name is required (max 200 characters)"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200, message = "Company must be at most 200 characters"))]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200, message = "Service must be at most 200 characters"))]
    pub service: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "Message is required (max 5000 characters)"))]
    pub message: String,
}

impl ContactSubmission {
    /// Trim surrounding whitespace so blank input fails the length checks.
    pub fn trimmed(self) -> Self {
        let opt = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        ContactSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: opt(self.phone),
            company: opt(self.company),
            service: opt(self.service),
            message: self.message.trim().to_string(),
        }
    }
}

// ============================================================================
// Page metadata
// ============================================================================

/// Response of `GET /api/meta`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMetaDto {
    pub path: String,
    pub canonical: String,
    #[serde(flatten)]
    pub meta: RouteMeta,
}

#[derive(Debug, Default, Deserialize)]
pub struct PathQuery {
    pub path: Option<String>,
}
