#![allow(missing_docs)]

use finder_router::{BuildMode, ClientRouter, RouteTable, RouteTableError};

// Stand-in for a view; the router never looks inside it.
#[derive(Debug, Clone, PartialEq)]
struct TestView {
    markup: &'static str,
}

fn table(mode: BuildMode) -> Result<RouteTable<TestView>, RouteTableError> {
    RouteTable::builder()
        .route("/", "Home", TestView { markup: "Home" })
        .route("/browse", "Browse", TestView { markup: "Browse" })
        .route_if(
            !mode.is_production(),
            "/parts",
            "Parts",
            TestView { markup: "Parts" },
        )
        .build()
}

#[test]
fn test_gated_route_only_in_development() {
    let dev = table(BuildMode::Development).unwrap();
    let prod = table(BuildMode::Production).unwrap();

    assert_eq!(dev.paths(), vec!["/", "/browse", "/parts"]);
    assert_eq!(prod.paths(), vec!["/", "/browse"]);
}

#[test]
fn test_router_hands_back_the_component() {
    let router = ClientRouter::new(table(BuildMode::Development).unwrap()).unwrap();

    let route = router.resolve("/parts").unwrap();
    assert_eq!(route.name(), "Parts");
    assert_eq!(route.component(), &TestView { markup: "Parts" });

    let home = router.resolve("").unwrap();
    assert_eq!(home.component().markup, "Home");
}

#[test]
fn test_production_router_does_not_match_gated_path() {
    let router = ClientRouter::new(table(BuildMode::Production).unwrap()).unwrap();

    assert!(router.resolve("/parts").is_none());
    assert_eq!(router.resolve_name("Parts"), None);
    assert_eq!(router.table().len(), 2);
}

#[test]
fn test_root_is_listed_first() {
    for mode in [BuildMode::Development, BuildMode::Production] {
        let table = table(mode).unwrap();
        let first = table.routes().first().unwrap();

        assert_eq!(first.path(), "/");
        assert_eq!(first.name(), "Home");
    }
}
