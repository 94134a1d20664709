//! Full render cycles on the in-memory backend: every re-render must leave the display tree
//! looking exactly like a fresh render of the new description.

use sprout::memory::{EventRegistry, MemoryDocument, MemoryNode, MemoryRenderer};
use sprout::{
    Attrs, Element, Node, Patch, PatchStats, RenderError, RenderOutcome, StyleMap, Target, attrs,
    diff, h, text,
};

fn renderer() -> MemoryRenderer {
    MemoryRenderer::new(MemoryDocument::new(), EventRegistry::new())
}

fn fresh_markup(description: &Node) -> String {
    let root = MemoryNode::element("root");
    renderer()
        .mount(Target::node(root.clone()), description.clone())
        .expect("fresh render");
    root.to_markup()
}

/// Renders `before`, then `after` into the same container and checks the patched tree
/// against a fresh render of `after`.
fn assert_transition(before: &Node, after: &Node) -> PatchStats {
    let root = MemoryNode::element("root");
    let mut renderer = renderer();
    renderer
        .mount(Target::node(root.clone()), before.clone())
        .expect("first render");
    let outcome = renderer
        .mount(Target::node(root.clone()), after.clone())
        .expect("re-render");
    assert_eq!(
        root.to_markup(),
        fresh_markup(after),
        "patched tree diverged from a fresh render"
    );
    match outcome {
        RenderOutcome::Patched(stats) => stats,
        other => panic!("expected a patch, got {other:?}"),
    }
}

fn todo_list(items: &[&str]) -> Node {
    h(
        "ul",
        [("class", "todo")],
        items
            .iter()
            .map(|item| h("li", (), *item))
            .collect::<Vec<_>>(),
    )
}

#[test]
fn first_render_matches_direct_materialization() {
    let description = h(
        "section",
        attrs! { "id" => "main", "tabindex" => 1 },
        (h("h1", (), "Title"), "body text", 42, None::<Node>),
    );
    assert_eq!(
        fresh_markup(&description),
        r#"<root><section id="main" tabindex="1"><h1>Title</h1>body text42</section></root>"#
    );
}

#[test]
fn re_rendering_the_same_description_changes_nothing() {
    let description = todo_list(&["a", "b"]);
    let stats = assert_transition(&description, &description);
    assert!(stats.is_clean(), "{stats}");
    assert_eq!(diff(&description, &description).map(|patch| patch.is_noop()), Some(true));
}

#[test]
fn element_type_change_replaces() {
    let stats = assert_transition(&h("div", (), "x"), &h("span", (), "x"));
    assert_eq!(stats.replaces, 1);

    let stats = assert_transition(&h("div", (), "x"), &text("x"));
    assert_eq!(stats.replaces, 1);
}

#[test]
fn removed_attributes_disappear() {
    let before = h("div", [("id", "x"), ("class", "a")], ());
    let after = h("div", [("class", "a")], ());
    let stats = assert_transition(&before, &after);
    assert_eq!(stats.attr_changes, 1);
    assert_eq!(fresh_markup(&after), r#"<root><div class="a"></div></root>"#);
}

#[test]
fn children_grow_and_shrink() {
    let short = todo_list(&["a"]);
    let long = todo_list(&["a", "b", "c"]);
    assert_eq!(assert_transition(&short, &long).creates, 2);
    assert_eq!(assert_transition(&long, &short).removes, 2);
}

#[test]
fn interleaved_removals_and_insertions_stay_aligned() {
    let before = h(
        "div",
        (),
        (Some(text("a")), None::<Node>, Some(text("c")), None::<Node>),
    );
    let after = h(
        "div",
        (),
        (None::<Node>, Some(text("b")), None::<Node>, Some(text("d"))),
    );
    let stats = assert_transition(&before, &after);
    assert_eq!((stats.creates, stats.removes), (2, 2));
    assert_eq!(fresh_markup(&after), "<root><div>bd</div></root>");
}

#[test]
fn absent_slots_do_not_shift_updates() {
    let before = h(
        "p",
        (),
        (None::<Node>, h("b", [("class", "x")], "bold")),
    );
    let after = h(
        "p",
        (),
        (None::<Node>, h("b", [("class", "y")], "bold")),
    );
    let stats = assert_transition(&before, &after);
    assert_eq!(stats.attr_changes, 1);
}

#[test]
fn failed_insertions_do_not_shift_later_siblings() {
    let root = MemoryNode::element("root");
    let mut renderer = renderer();
    renderer
        .mount(
            Target::node(root.clone()),
            h("div", (), (None::<Node>, h("span", (), "a"))),
        )
        .expect("first render");

    let untagged = Node::from(Element::new("", Attrs::new(), Vec::new()));
    let error = renderer
        .mount(
            Target::node(root.clone()),
            h("div", (), (untagged, h("span", (), "b"))),
        )
        .expect_err("an empty tag cannot be created");
    assert!(matches!(error, RenderError::Display(_)), "{error:?}");
    assert_eq!(root.to_markup(), "<root><div><span>b</span></div></root>");
}

#[test]
fn root_can_appear_and_disappear() {
    let stats = assert_transition(&Node::Absent, &h("p", (), "now"));
    assert_eq!(stats.creates, 1);
    let stats = assert_transition(&h("p", (), "gone"), &Node::Absent);
    assert_eq!(stats.removes, 1);
}

#[test]
fn live_properties_and_styles_follow_the_description() {
    let mut style = StyleMap::new();
    style.insert("color".into(), "red".into());
    let before = h(
        "input",
        attrs! { "type" => "checkbox", "checked" => true, "style" => style },
        (),
    );
    let after = h("input", attrs! { "type" => "checkbox" }, ());

    let root = MemoryNode::element("root");
    let mut renderer = renderer();
    renderer
        .mount(Target::node(root.clone()), before)
        .expect("first render");
    let input = root.child(0).expect("input");
    assert_eq!(input.property("checked"), Some(true.into()));
    assert_eq!(input.style("color").as_deref(), Some("red"));

    renderer
        .mount(Target::node(root.clone()), after)
        .expect("re-render");
    assert!(input.ptr_eq(&root.child(0).expect("input")));
    assert_eq!(input.property("checked"), None);
    assert_eq!(input.style("color"), None);
}

#[test]
fn dropped_styles_match_a_fresh_render() {
    let mut style = StyleMap::new();
    style.insert("color".into(), "red".into());
    let stats = assert_transition(&h("p", attrs! { "style" => style }, "x"), &h("p", (), "x"));
    assert_eq!(stats.attr_changes, 1);
}

#[test]
fn round_trip_through_many_descriptions() {
    let descriptions = [
        todo_list(&[]),
        todo_list(&["a", "b"]),
        h("ol", (), "swapped"),
        todo_list(&["c"]),
        text("plain"),
        todo_list(&["c", "d", "e"]),
    ];

    let root = MemoryNode::element("root");
    let mut renderer = renderer();
    for description in &descriptions {
        renderer
            .mount(Target::node(root.clone()), description.clone())
            .expect("render");
        assert_eq!(root.to_markup(), fresh_markup(description));
    }
}

#[test]
fn update_keeps_display_identity() {
    let root = MemoryNode::element("root");
    let mut renderer = renderer();
    renderer
        .mount(Target::node(root.clone()), todo_list(&["a"]))
        .expect("render");
    let list = root.child(0).expect("list");
    renderer
        .mount(Target::node(root.clone()), todo_list(&["a", "b"]))
        .expect("render");
    assert!(list.ptr_eq(&root.child(0).expect("list")));
    assert!(matches!(
        diff(&todo_list(&["a"]), &todo_list(&["b"])),
        Some(Patch::Update(_))
    ));
}
