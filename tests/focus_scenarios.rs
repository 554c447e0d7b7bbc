use chrono::NaiveDate;
use scenario_timeline::{
    Dependency, Diagnostic, FocusRule, FocusSelection, Item, ItemKey, MissingDate, Scenario,
    Timeline, TimelineConfig,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn e1() -> Item {
    Item::new("E1", date(2026, 1, 1), date(2026, 3, 1))
}

fn e2() -> Item {
    Item::new("E2", date(2026, 2, 1), date(2026, 4, 1))
}

fn load(items: Vec<Item>, deps: Vec<Dependency>, rule: FocusRule) -> Timeline {
    let config = TimelineConfig::default().with_focus_rule(rule);
    Timeline::load(Scenario::new(items, deps), config).unwrap()
}

fn visible_keys(frame: &scenario_timeline::Frame) -> Vec<&str> {
    frame.visible.iter().map(ItemKey::as_str).collect()
}

#[test]
fn linked_focus_keeps_the_edge_and_its_path() {
    let timeline = load(vec![e1(), e2()], vec![Dependency::new("E1", "E2")], FocusRule::DirectLinks);

    let overview = timeline.frame(&FocusSelection::None);
    assert_eq!(visible_keys(&overview), ["E1", "E2"]);
    assert_eq!(overview.edges.len(), 1);

    let focused = timeline.frame(&FocusSelection::item("E1"));
    assert_eq!(visible_keys(&focused), ["E1", "E2"]);
    assert_eq!(focused.edges, overview.edges);
    assert_eq!(focused.bars, overview.bars);
}

#[test]
fn edge_path_starts_and_ends_on_the_real_bars() {
    let timeline = load(vec![e1(), e2()], vec![Dependency::new("E1", "E2")], FocusRule::default());
    let frame = timeline.frame(&FocusSelection::None);
    let path = &frame.edges[0].path;
    let from = frame.bar("E1").unwrap();
    let to = frame.bar("E2").unwrap();

    let start = path.start().unwrap();
    let end = path.end().unwrap();
    assert_eq!((start.x, start.y), (from.right(), from.center_y()));
    assert_eq!((end.x, end.y), (to.left(), to.center_y()));
    // E2 ends on the last domain date, but neither anchor is that pixel.
    let domain_end = timeline.scale().domain_end_x();
    assert!(path.points().iter().all(|p| p.x != domain_end));
}

#[test]
fn unrelated_focus_hides_both_endpoints_and_the_edge() {
    let e3 = Item::new("E3", date(2026, 1, 10), date(2026, 1, 20));
    let timeline = load(
        vec![e1(), e2(), e3],
        vec![Dependency::new("E1", "E2")],
        FocusRule::HierarchyAndLinks,
    );

    let frame = timeline.frame(&FocusSelection::item("E3"));
    assert_eq!(visible_keys(&frame), ["E3"]);
    assert!(frame.bar("E1").is_none());
    assert!(frame.bar("E2").is_none());
    assert!(frame.edges.is_empty());
    assert_eq!(frame.bar("E3"), timeline.bars().get("E3"));
}

#[test]
fn dateless_item_is_dropped_without_disturbing_the_rest() {
    let mut e4 = Item::undated("E4");
    e4.start_date = Some(date(2026, 2, 10));
    let deps = vec![
        Dependency::new("E1", "E4"),
        Dependency::new("E1", "E2"),
        Dependency::new("E4", "E2"),
    ];
    let with_e4 = load(vec![e1(), e4, e2()], deps, FocusRule::default());
    let without_e4 = load(
        vec![e1(), e2()],
        vec![Dependency::new("E1", "E2")],
        FocusRule::default(),
    );

    assert_eq!(
        with_e4.load_diagnostics().iter().cloned().collect::<Vec<_>>(),
        [Diagnostic::MissingDate {
            key: ItemKey::from("E4"),
            missing: MissingDate::End,
        }]
    );
    assert!(!with_e4.bars().contains("E4"));

    let frame = with_e4.frame(&FocusSelection::None);
    let expected = without_e4.frame(&FocusSelection::None);
    assert_eq!(frame.bars, expected.bars);
    assert_eq!(frame.edges, expected.edges);
    assert!(frame
        .edges
        .iter()
        .all(|e| e.from.as_str() != "E4" && e.to.as_str() != "E4"));
}

#[test]
fn focusing_a_dateless_item_never_invents_its_bar() {
    let e4 = Item::undated("E4");
    let timeline = load(
        vec![e1(), e4, e2()],
        vec![Dependency::new("E4", "E2")],
        FocusRule::DirectLinks,
    );
    let frame = timeline.frame(&FocusSelection::item("E4"));
    assert_eq!(visible_keys(&frame), ["E2"]);
    assert!(frame.edges.is_empty());
}

#[test]
fn unknown_dependency_endpoint_is_dropped_at_load() {
    let timeline = load(
        vec![e1(), e2()],
        vec![Dependency::new("E1", "PRODUCT-404"), Dependency::new("E1", "E2")],
        FocusRule::default(),
    );
    assert_eq!(timeline.graph().len(), 1);
    assert!(matches!(
        timeline.load_diagnostics().iter().next(),
        Some(Diagnostic::UnknownDependencyEndpoint { .. })
    ));
    assert_eq!(timeline.frame(&FocusSelection::None).edges.len(), 1);
}

#[test]
fn epic_focus_shows_its_stories_at_unchanged_positions() {
    let items = vec![
        Item::new("PRODUCT-33712", date(2026, 1, 5), date(2026, 3, 27)).with_kind(scenario_timeline::ItemKind::Epic),
        Item::new("PRODUCT-33713", date(2026, 1, 5), date(2026, 1, 30)).with_parent("PRODUCT-33712"),
        Item::new("PRODUCT-33715", date(2026, 2, 2), date(2026, 2, 27)).with_parent("PRODUCT-33712"),
        Item::new("PRODUCT-40000", date(2025, 12, 1), date(2026, 1, 9)),
        Item::new("PRODUCT-34063", date(2026, 3, 2), date(2026, 4, 24)),
    ];
    let deps = vec![
        Dependency::new("PRODUCT-33713", "PRODUCT-33715"),
        Dependency::new("PRODUCT-33715", "PRODUCT-34063"),
        Dependency::new("PRODUCT-40000", "PRODUCT-33713"),
    ];
    let timeline = load(items, deps, FocusRule::Hierarchy);

    let overview = timeline.frame(&FocusSelection::None);
    let focused = timeline.frame(&FocusSelection::item("PRODUCT-33712"));

    assert_eq!(
        visible_keys(&focused),
        ["PRODUCT-33712", "PRODUCT-33713", "PRODUCT-33715"]
    );
    for (key, bar) in &focused.bars {
        assert_eq!(Some(bar), overview.bars.get(key));
    }
    let edges: Vec<_> = focused
        .edges
        .iter()
        .map(|e| (e.from.as_str(), e.to.as_str()))
        .collect();
    assert_eq!(edges, [("PRODUCT-33713", "PRODUCT-33715")]);
}

#[test]
fn today_marker_is_an_explicit_input() {
    let timeline = load(vec![e1(), e2()], vec![], FocusRule::default());
    let scale = timeline.scale();
    assert_eq!(timeline.today_x(date(2026, 1, 29)), Some(scale.map(date(2026, 1, 29))));
    assert_eq!(timeline.today_x(date(2027, 1, 1)), None);
}
