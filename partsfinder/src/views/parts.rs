use finder::View;

/// Listing of collected parts, filled in by the browser from `/api/parts`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parts;

impl View for Parts {
    fn render(&self) -> String {
        r#"<section class="parts">
    <h1>Parts</h1>
    <form class="parts-filter">
        <input type="search" name="type" placeholder="Filter by type" />
        <select name="newer_than_hours">
            <option value="">Any age</option>
            <option value="24">Last 24 hours</option>
            <option value="72">Last 3 days</option>
        </select>
    </form>
    <ul class="parts-list" data-endpoint="/api/parts"></ul>
</section>"#
            .to_owned()
    }
}
