//! Outbound requests and the context threaded from listing to detail pages.

use serde::{Deserialize, Serialize};

/// Listing-row metadata carried to the detail page handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub rank: u32,
    pub platform: String,
}

/// A detail page to fetch together with its listing context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRequest {
    /// Absolute detail page URL
    pub url: String,
    pub context: RequestContext,
}

impl DetailRequest {
    pub fn new(url: impl Into<String>, rank: u32, platform: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            context: RequestContext {
                rank,
                platform: platform.into(),
            },
        }
    }
}
