use finder::View;

#[derive(Debug, Clone, Copy, Default)]
pub struct Browse;

impl View for Browse {
    fn render(&self) -> String {
        r#"<section class="browse">
    <h1>Browse</h1>
    <div class="browse-grid" data-endpoint="/api/parts?limit=30"></div>
</section>"#
            .to_owned()
    }
}
