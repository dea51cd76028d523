use finder::View;

#[derive(Debug, Clone, Copy, Default)]
pub struct Home;

impl View for Home {
    fn render(&self) -> String {
        r#"<section class="home">
    <h1>DSM Parts Finder</h1>
    <p>Used parts for the Mitsubishi Eclipse, Eagle Talon and Plymouth Laser, collected from classifieds and salvage yards.</p>
</section>"#
            .to_owned()
    }
}
