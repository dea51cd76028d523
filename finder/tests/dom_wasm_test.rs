#![cfg(target_arch = "wasm32")]
#![allow(missing_docs)]

use finder::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn add_target(id: &str) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let target = document.create_element("div").unwrap();
    target.set_id(id);
    document.body().unwrap().append_child(&target).unwrap();
    target
}

#[wasm_bindgen_test]
fn test_document_host_attaches_markup() {
    let target = add_target("mount-target-1");
    let mut host = DocumentHost::new().unwrap();

    host.attach("#mount-target-1", "<h1>Home</h1>").unwrap();

    assert_eq!(target.inner_html(), "<h1>Home</h1>");
    assert!(host.target().is_some());
}

#[wasm_bindgen_test]
fn test_document_host_missing_target() {
    let mut host = DocumentHost::new().unwrap();

    assert_eq!(
        host.attach("#does-not-exist", "Home"),
        Err(MountError::TargetNotFound {
            selector: "#does-not-exist".to_owned()
        })
    );
}

#[wasm_bindgen_test]
fn test_app_renders_layout_into_document() {
    let target = add_target("mount-target-2");
    let mut host = DocumentHost::new().unwrap();

    let mounted = App::new("<header>DSM</header>").mount(&mut host, "#mount-target-2", "/").unwrap();

    assert_eq!(mounted.selector(), "#mount-target-2");
    assert_eq!(target.inner_html(), "<header>DSM</header>");
}

struct NavLayout;

impl View for NavLayout {
    fn render(&self) -> String {
        format!(r#"<a id="sites-link" href="/sites" data-link>Sites</a><main>{}</main>"#, finder::outlet::OUTLET)
    }
}

fn nav_router() -> ViewRouter {
    let home: ViewRef = std::sync::Arc::new("<h1>Home</h1>");
    let sites: ViewRef = std::sync::Arc::new("<h1>Sites</h1>");

    let table = RouteTable::builder()
        .route("/", "Home", home)
        .route("/sites", "Sites", sites)
        .build()
        .unwrap();

    ClientRouter::new(table).unwrap()
}

// One test drives every navigation source, since the listeners it installs
// live for the rest of the page.
#[wasm_bindgen_test]
fn test_navigation_rerenders_target() {
    use finder::finder_router::history;
    use wasm_bindgen::JsCast;

    let target = add_target("mount-target-nav");
    history::push("/").unwrap();

    App::new(NavLayout)
        .use_router(nav_router())
        .mount_to_document("#mount-target-nav")
        .unwrap();
    assert!(target.inner_html().contains("<h1>Home</h1>"));

    history::navigate("/sites").unwrap();
    assert!(target.inner_html().contains("<h1>Sites</h1>"));
    assert_eq!(history::current_path().unwrap(), "/sites");

    history::push("/").unwrap();
    let popstate = web_sys::Event::new("popstate").unwrap();
    web_sys::window().unwrap().dispatch_event(&popstate).unwrap();
    assert!(target.inner_html().contains("<h1>Home</h1>"));

    let document = web_sys::window().unwrap().document().unwrap();
    let link = document
        .get_element_by_id("sites-link")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    link.click();

    assert!(target.inner_html().contains("<h1>Sites</h1>"));
    assert_eq!(history::current_path().unwrap(), "/sites");
}
