//! Outlet markers used to compose a layout with the current route's view.
//!
//! A layout embeds [`OUTLET`] where routed content belongs:
//! ```html
//! <!-- @outlet-begin -->
//! <!-- @outlet-end -->
//! ```
//!
//! After composition the markers carry the route path:
//! ```html
//! <!-- @outlet-begin:/parts -->
//! Parts markup
//! <!-- @outlet-end:/parts -->
//! ```

const OUTLET_BEGIN: &str = "<!-- @outlet-begin -->";
const OUTLET_END: &str = "<!-- @outlet-end -->";

/// Empty outlet for layouts to embed.
pub const OUTLET: &str = "<!-- @outlet-begin --><!-- @outlet-end -->";

/// Whether `layout` contains an unfilled outlet.
pub fn has_outlet(layout: &str) -> bool {
    match layout.find(OUTLET_BEGIN) {
        Some(begin) => layout[begin..].contains(OUTLET_END),
        None => false,
    }
}

/// Replaces whatever sits between the first outlet's markers with `content`.
///
/// Returns `None` if `layout` has no outlet.
pub fn fill_outlet(layout: &str, path: &str, content: &str) -> Option<String> {
    let begin = layout.find(OUTLET_BEGIN)?;
    let inner_start = begin + OUTLET_BEGIN.len();
    let end = inner_start + layout[inner_start..].find(OUTLET_END)?;
    let after = end + OUTLET_END.len();

    let mut html = String::with_capacity(layout.len() + content.len() + 2 * path.len());
    html.push_str(&layout[..begin]);
    html.push_str(&format!("<!-- @outlet-begin:{path} -->"));
    html.push_str(content);
    html.push_str(&format!("<!-- @outlet-end:{path} -->"));
    html.push_str(&layout[after..]);

    Some(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_outlet() {
        let layout = format!("<nav>menu</nav><main>{OUTLET}</main>");

        assert_eq!(
            fill_outlet(&layout, "/parts", "<h1>Parts</h1>").as_deref(),
            Some(
                "<nav>menu</nav><main><!-- @outlet-begin:/parts --><h1>Parts</h1><!-- @outlet-end:/parts --></main>"
            )
        );
    }

    #[test]
    fn test_fill_replaces_placeholder_content() {
        let layout = "<main><!-- @outlet-begin -->Loading...<!-- @outlet-end --></main>";

        assert_eq!(
            fill_outlet(layout, "/", "Home").as_deref(),
            Some("<main><!-- @outlet-begin:/ -->Home<!-- @outlet-end:/ --></main>")
        );
    }

    #[test]
    fn test_only_first_outlet_is_filled() {
        let layout = format!("{OUTLET}|{OUTLET}");
        let html = fill_outlet(&layout, "/sites", "Sites").unwrap();

        assert_eq!(
            html,
            format!("<!-- @outlet-begin:/sites -->Sites<!-- @outlet-end:/sites -->|{OUTLET}")
        );
    }

    #[test]
    fn test_layout_without_outlet() {
        assert!(!has_outlet("<main></main>"));
        assert!(!has_outlet("<!-- @outlet-end --><!-- @outlet-begin -->"));
        assert!(has_outlet(OUTLET));
        assert_eq!(fill_outlet("<main></main>", "/", "Home"), None);
    }
}
