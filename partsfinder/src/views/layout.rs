use finder::{View, outlet::OUTLET};

/// Root layout: header with navigation, routed page below.
#[derive(Debug, Clone, Copy, Default)]
pub struct Layout;

impl View for Layout {
    fn render(&self) -> String {
        format!(
            r#"<header class="app-header">
    <a href="/" data-link class="brand">DSM Parts Finder</a>
    <nav>
        <a href="/sites" data-link>Sites</a>
        <a href="/parts" data-link>Parts</a>
    </nav>
</header>
<main class="app-main">{OUTLET}</main>"#
        )
    }
}
