//! Attaching rendered markup to a mount target.

use std::ops::Range;

/// Errors raised while attaching an application to its mount target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    /// Nothing matches the selector.
    #[error("mount target '{selector}' not found")]
    TargetNotFound {
        /// Selector that matched nothing.
        selector: String,
    },

    /// The host cannot interpret this kind of selector.
    #[error("unsupported mount selector '{0}', expected '#id'")]
    UnsupportedSelector(String),

    /// There is no `window.document`.
    #[error("no document to mount into")]
    NoDocument,

    /// The browser rejected a DOM call.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// Somewhere an application's markup can be attached.
pub trait MountHost {
    /// Replaces the contents of the element matching `selector` with `html`.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::TargetNotFound`] when nothing matches `selector`.
    fn attach(&mut self, selector: &str, html: &str) -> Result<(), MountError>;
}

/// An HTML document held as a string, e.g. the `index.html` shell.
///
/// Only id selectors (`#app`) are understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellHost {
    document: String,
}

impl ShellHost {
    /// Wraps a full HTML document.
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }

    /// The document as it currently reads.
    pub fn as_str(&self) -> &str {
        &self.document
    }

    /// Gives the document back.
    pub fn into_html(self) -> String {
        self.document
    }
}

impl MountHost for ShellHost {
    fn attach(&mut self, selector: &str, html: &str) -> Result<(), MountError> {
        let Some(id) = selector.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return Err(MountError::UnsupportedSelector(selector.to_owned()));
        };

        let range = inner_range(&self.document, id).ok_or_else(|| MountError::TargetNotFound {
            selector: selector.to_owned(),
        })?;

        self.document.replace_range(range, html);

        Ok(())
    }
}

// Byte range of the children of the element whose id is `id`.
fn inner_range(document: &str, id: &str) -> Option<Range<usize>> {
    let (open_start, attribute) = find_id_attribute(document, id)?;
    let tag: String = document[open_start + 1..]
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect();

    if tag.is_empty() {
        return None;
    }

    let open_end = attribute + document[attribute..].find('>')? + 1;

    if document[..open_end].ends_with("/>") {
        return None;
    }

    let open_pattern = format!("<{tag}");
    let close_pattern = format!("</{tag}>");
    let mut depth = 1;
    let mut cursor = open_end;

    loop {
        let close = cursor + document[cursor..].find(&close_pattern)?;
        let open = next_open_tag(document, cursor, &open_pattern).filter(|&open| open < close);

        if let Some(open) = open {
            let tag_end = open + document[open..].find('>')? + 1;

            // `<div/>` opens nothing.
            if !document[..tag_end].ends_with("/>") {
                depth += 1;
            }

            cursor = tag_end;
            continue;
        }

        depth -= 1;
        if depth == 0 {
            return Some(open_end..close);
        }

        cursor = close + close_pattern.len();
    }
}

// Start of the opening tag holding `id="{id}"` as a whole attribute, and the
// attribute's own position. The earliest match in the document wins.
fn find_id_attribute(document: &str, id: &str) -> Option<(usize, usize)> {
    let needles = [format!("id=\"{id}\""), format!("id='{id}'")];

    needles
        .iter()
        .flat_map(|needle| document.match_indices(needle.as_str()).map(|(at, _)| at))
        .filter(|&at| document[..at].ends_with(|c: char| c.is_ascii_whitespace()))
        .filter_map(|at| {
            let open_start = document[..at].rfind('<')?;
            let inside_tag = !document[open_start..at].contains('>');

            inside_tag.then_some((open_start, at))
        })
        .min()
}

// Position of the next `<tag` that is a whole tag name, not a prefix of a longer one.
fn next_open_tag(document: &str, from: usize, pattern: &str) -> Option<usize> {
    let mut cursor = from;

    while let Some(offset) = document[cursor..].find(pattern) {
        let start = cursor + offset;
        let next = document[start + pattern.len()..].chars().next();

        if matches!(next, Some(c) if c.is_ascii_whitespace() || c == '>' || c == '/') {
            return Some(start);
        }

        cursor = start + pattern.len();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><title>DSM Parts Finder</title></head>
<body><div id="app"></div><script type="module" src="/assets/index.js"></script></body>
</html>"#;

    #[test]
    fn test_attach_into_empty_target() {
        let mut host = ShellHost::new(SHELL);
        host.attach("#app", "<h1>Home</h1>").unwrap();

        assert!(host.as_str().contains(r#"<div id="app"><h1>Home</h1></div>"#));
        assert!(host.as_str().ends_with("</html>"));
    }

    #[test]
    fn test_attach_replaces_existing_children() {
        let mut host = ShellHost::new(
            r#"<body><div class="root" id='app'><div>Loading<div>...</div></div></div><footer></footer></body>"#,
        );
        host.attach("#app", "Parts").unwrap();

        assert_eq!(
            host.into_html(),
            r#"<body><div class="root" id='app'>Parts</div><footer></footer></body>"#
        );
    }

    #[test]
    fn test_similar_tag_names_do_not_nest() {
        let mut host = ShellHost::new(r#"<main id="app"><mainframe></mainframe></main><p>after</p>"#);
        host.attach("#app", "x").unwrap();

        assert_eq!(host.as_str(), r#"<main id="app">x</main><p>after</p>"#);
    }

    #[test]
    fn test_id_must_be_a_whole_attribute() {
        let mut host = ShellHost::new(r#"<nav data-id="app">menu</nav><div id="app"></div>"#);
        host.attach("#app", "X").unwrap();

        assert_eq!(
            host.as_str(),
            r#"<nav data-id="app">menu</nav><div id="app">X</div>"#
        );
    }

    #[test]
    fn test_id_text_outside_a_tag_is_ignored() {
        let mut host = ShellHost::new(r#"<p>use id="app" to mount</p><main id="app"></main>"#);
        host.attach("#app", "X").unwrap();

        assert_eq!(host.as_str(), r#"<p>use id="app" to mount</p><main id="app">X</main>"#);
    }

    #[test]
    fn test_self_closing_children_do_not_nest() {
        let mut host = ShellHost::new(r#"<div id="app"><div/><p>a</p><div class="x" /></div><footer></footer>"#);
        host.attach("#app", "X").unwrap();

        assert_eq!(host.as_str(), r#"<div id="app">X</div><footer></footer>"#);
    }

    #[test]
    fn test_missing_target() {
        let mut host = ShellHost::new("<body><div id=\"root\"></div></body>");

        assert_eq!(
            host.attach("#app", "Home"),
            Err(MountError::TargetNotFound {
                selector: "#app".to_owned()
            })
        );
    }

    #[test]
    fn test_self_closing_target_is_not_mountable() {
        let mut host = ShellHost::new(r#"<body><div id="app"/></body>"#);

        assert!(matches!(
            host.attach("#app", "Home"),
            Err(MountError::TargetNotFound { .. })
        ));
    }

    #[test]
    fn test_unsupported_selector() {
        let mut host = ShellHost::new(SHELL);

        assert_eq!(
            host.attach(".app", "Home"),
            Err(MountError::UnsupportedSelector(".app".to_owned()))
        );
        assert_eq!(
            host.attach("#", "Home"),
            Err(MountError::UnsupportedSelector("#".to_owned()))
        );
    }
}
