//! Navigation menu and static page types.

use serde::{Deserialize, Serialize};

use super::product::Seo;

/// A navigation menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    /// Display title.
    pub title: String,
    /// Storefront path.
    pub path: String,
}

/// A static content page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// HTML body.
    pub body: String,
    /// Short summary of the body.
    pub body_summary: String,
    /// SEO metadata.
    pub seo: Seo,
}
