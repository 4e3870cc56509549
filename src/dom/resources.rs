//! Embedded image references.
//!
//! Walks `<img>` elements in document order and resolves their `src`
//! attributes to absolute URLs against the page base.

use url::Url;

use crate::dom::DomNode;

/// Resolve a potentially relative URL against a base URL.
///
/// Absolute sources pass through unchanged; anything else must resolve to a
/// syntactically valid absolute URL or it is rejected.
pub fn resolve_url(base: &str, href: &str) -> Option<String> {
    // Already absolute
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    // Protocol-relative
    if let Some(rest) = href.strip_prefix("//") {
        return Some(format!("https://{}", rest));
    }
    let base_url = Url::parse(base).ok()?;
    base_url.join(href).ok().map(|u| u.to_string())
}

/// Absolute URLs of all `<img>` elements, in document order.
///
/// Elements without a `src` are skipped; duplicates are kept. Sources that
/// cannot be resolved against the base are dropped with a warning so every
/// returned entry is a valid absolute URL.
pub fn extract_images(node: &DomNode, base_url: &str) -> Vec<String> {
    let mut out = Vec::new();
    collect_images(node, base_url, &mut out);
    out
}

fn collect_images(node: &DomNode, base_url: &str, out: &mut Vec<String>) {
    if node.tag == "img" {
        if let Some(src) = node.attr("src") {
            match resolve_url(base_url, src) {
                Some(abs) => out.push(abs),
                None => log::warn!("skipping unresolvable image src: {}", src),
            }
        }
    }
    for child in &node.children {
        collect_images(child, base_url, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parser::parse_html;

    const BASE: &str = "https://x.com/p/";

    #[test]
    fn relative_src_resolves_against_base_path() {
        assert_eq!(
            resolve_url(BASE, "img/a.png").as_deref(),
            Some("https://x.com/p/img/a.png")
        );
    }

    #[test]
    fn rooted_src_resolves_against_host() {
        assert_eq!(
            resolve_url(BASE, "/img/a.png").as_deref(),
            Some("https://x.com/img/a.png")
        );
    }

    #[test]
    fn absolute_src_passes_through() {
        assert_eq!(
            resolve_url(BASE, "https://cdn.example.com/a.png").as_deref(),
            Some("https://cdn.example.com/a.png")
        );
    }

    #[test]
    fn protocol_relative_src_gets_https() {
        assert_eq!(
            resolve_url(BASE, "//cdn.example.com/a.png").as_deref(),
            Some("https://cdn.example.com/a.png")
        );
    }

    #[test]
    fn images_come_out_in_document_order_with_duplicates() {
        let tree = parse_html(
            r#"<html><body>
                <img src="one.png">
                <div><img src="/two.png"></div>
                <img src="one.png">
                <img alt="no source">
            </body></html>"#,
            BASE,
        );
        let images = extract_images(&tree.root, BASE);
        assert_eq!(
            images,
            vec![
                "https://x.com/p/one.png",
                "https://x.com/two.png",
                "https://x.com/p/one.png",
            ]
        );
    }
}
