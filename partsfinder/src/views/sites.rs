use finder::View;

/// The classified and salvage sites parts are collected from.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sites;

impl View for Sites {
    fn render(&self) -> String {
        r#"<section class="sites">
    <h1>Sites</h1>
    <ul class="sites-list" data-endpoint="/api/sites"></ul>
</section>"#
            .to_owned()
    }
}
