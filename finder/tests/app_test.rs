#![allow(missing_docs)]

use finder::outlet::OUTLET;
use finder::prelude::*;
use std::sync::Arc;

struct Layout;

impl View for Layout {
    fn render(&self) -> String {
        format!("<nav>DSM</nav><main>{OUTLET}</main>")
    }
}

// Records every attach so tests can count mount attempts.
#[derive(Default)]
struct RecordingHost {
    attached: Vec<(String, String)>,
}

impl MountHost for RecordingHost {
    fn attach(&mut self, selector: &str, html: &str) -> Result<(), MountError> {
        self.attached.push((selector.to_owned(), html.to_owned()));
        Ok(())
    }
}

fn router() -> ViewRouter {
    let home: ViewRef = Arc::new("<h1>Home</h1>");
    let sites: ViewRef = Arc::new("<h1>Sites</h1>");

    let table = RouteTable::builder()
        .route("/", "Home", home)
        .route("/sites", "Sites", sites)
        .build()
        .unwrap();

    ClientRouter::new(table).unwrap()
}

#[test]
fn test_render_without_router_is_just_the_layout() {
    let app = App::new(Layout);

    assert_eq!(
        app.render("/sites"),
        format!("<nav>DSM</nav><main>{OUTLET}</main>")
    );
}

#[test]
fn test_render_fills_outlet_with_matched_view() {
    let app = App::new(Layout).use_router(router());

    assert_eq!(
        app.render("/sites?from=nav"),
        "<nav>DSM</nav><main><!-- @outlet-begin:/sites --><h1>Sites</h1><!-- @outlet-end:/sites --></main>"
    );
}

#[test]
fn test_unknown_location_renders_empty_outlet() {
    let app = App::new(Layout).use_router(router());

    assert_eq!(
        app.render("/nowhere/"),
        "<nav>DSM</nav><main><!-- @outlet-begin:/nowhere --><!-- @outlet-end:/nowhere --></main>"
    );
}

#[test]
fn test_mount_attaches_once() {
    let mut host = RecordingHost::default();

    let mounted = App::new(Layout)
        .use_router(router())
        .mount(&mut host, "#app", "/")
        .unwrap();

    assert_eq!(host.attached.len(), 1);
    assert_eq!(host.attached[0].0, "#app");
    assert!(host.attached[0].1.contains("<h1>Home</h1>"));
    assert_eq!(mounted.selector(), "#app");
    assert!(mounted.render("/sites").contains("<h1>Sites</h1>"));
}

#[test]
fn test_mount_into_shell() {
    let mut shell = ShellHost::new(r#"<body><div id="app"></div></body>"#);

    App::new(Layout)
        .use_router(router())
        .mount(&mut shell, "#app", "/")
        .unwrap();

    assert_eq!(
        shell.into_html(),
        r#"<body><div id="app"><nav>DSM</nav><main><!-- @outlet-begin:/ --><h1>Home</h1><!-- @outlet-end:/ --></main></div></body>"#
    );
}

#[test]
fn test_mount_without_target_fails() {
    let mut shell = ShellHost::new("<body></body>");

    let err = App::new(Layout).mount(&mut shell, "#app", "/").unwrap_err();

    assert_eq!(
        err,
        MountError::TargetNotFound {
            selector: "#app".to_owned()
        }
    );
}
