//! Static content pages and navigation menus.
//!
//! The shop has no CMS; the handful of static pages live here and the
//! navigation menu is assembled from the storefront collections.

use mero_closet_core::{Collection, Menu, Page, Seo};

/// All static content pages.
#[must_use]
pub fn pages() -> Vec<Page> {
    vec![
        Page {
            id: "about".to_string(),
            title: "About Mero Closet".to_string(),
            handle: "about".to_string(),
            body: "<p><strong>Mero Closet</strong> — Gulf luxury abayas, mokhawir, and curated \
                   looks.</p><p>Quality fabrics, clean tailoring, and modern details.</p>"
                .to_string(),
            body_summary: "Gulf luxury abayas, mokhawir, and curated looks.".to_string(),
            seo: Seo {
                title: "About Mero Closet".to_string(),
                description: "Gulf luxury abayas and mokhawir.".to_string(),
            },
        },
        Page {
            id: "returns".to_string(),
            title: "Return Policy".to_string(),
            handle: "returns".to_string(),
            body: "<p>Returns are accepted within 7 days for unused items with original \
                   packaging.</p><p>Contact us to start a return.</p>"
                .to_string(),
            body_summary: "Returns within 7 days for unused items.".to_string(),
            seo: Seo {
                title: "Return Policy".to_string(),
                description: "Returns within 7 days for unused items.".to_string(),
            },
        },
    ]
}

/// Look up a static page by handle.
#[must_use]
pub fn page(handle: &str) -> Option<Page> {
    pages().into_iter().find(|p| p.handle == handle)
}

/// Assemble a navigation menu from the storefront collections.
///
/// Every menu starts with an "All" entry; footer menus append the static
/// pages.
#[must_use]
pub fn build_menu(collections: &[Collection], handle: &str) -> Vec<Menu> {
    let mut items = vec![Menu {
        title: "All".to_string(),
        path: "/search".to_string(),
    }];
    items.extend(collections.iter().map(|c| Menu {
        title: c.title.clone(),
        path: c.path.clone(),
    }));

    if handle.contains("footer") {
        items.push(Menu {
            title: "About".to_string(),
            path: "/about".to_string(),
        });
        items.push(Menu {
            title: "Return Policy".to_string(),
            path: "/returns".to_string(),
        });
    }

    items
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn collection(handle: &str, title: &str) -> Collection {
        Collection {
            handle: handle.to_string(),
            title: title.to_string(),
            description: title.to_string(),
            path: format!("/search/{handle}"),
            image: None,
            updated_at: None,
            seo: Seo {
                title: title.to_string(),
                description: title.to_string(),
            },
        }
    }

    #[test]
    fn test_menu_starts_with_all() {
        let menu = build_menu(&[collection("abayas", "Abayas")], "main-menu");
        assert_eq!(menu[0].title, "All");
        assert_eq!(menu[0].path, "/search");
        assert_eq!(menu[1].title, "Abayas");
        assert_eq!(menu[1].path, "/search/abayas");
        assert_eq!(menu.len(), 2);
    }

    #[test]
    fn test_footer_menu_appends_static_entries() {
        let menu = build_menu(&[], "footer");
        let titles: Vec<&str> = menu.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["All", "About", "Return Policy"]);
    }

    #[test]
    fn test_page_lookup() {
        assert_eq!(page("about").unwrap().title, "About Mero Closet");
        assert!(page("missing").is_none());
    }
}
