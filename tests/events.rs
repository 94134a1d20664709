use std::{cell::RefCell, rc::Rc};

use sprout::memory::{EventRegistry, MemoryDocument, MemoryNode, MemoryRenderer};
use sprout::{BindingConfig, Handler, Node, Target, attrs, h};

type Log = Rc<RefCell<Vec<String>>>;

fn recorder(log: &Log, label: &'static str) -> Handler {
    let log = log.clone();
    Handler::new(move |event| {
        let entry = match event.value() {
            Some(value) => format!("{label}:{}:{value}", event.name()),
            None => format!("{label}:{}", event.name()),
        };
        log.borrow_mut().push(entry);
    })
}

fn button(handler: Handler) -> Node {
    h("button", attrs! { "onClick" => handler, "type" => "button" }, "go")
}

#[test]
fn event_keys_are_not_attributes() {
    let root = MemoryNode::element("root");
    let log = Log::default();
    let mut renderer = MemoryRenderer::new(MemoryDocument::new(), EventRegistry::new());
    renderer
        .mount(Target::node(root.clone()), button(recorder(&log, "a")))
        .expect("render");

    let node = root.child(0).expect("button");
    assert_eq!(node.attribute_names(), ["type"]);
    assert_eq!(renderer.binder().dispatch(&node, "click"), 1);
    assert_eq!(*log.borrow(), ["a:click"]);
}

#[test]
fn fresh_handlers_accumulate_across_renders() {
    let root = MemoryNode::element("root");
    let log = Log::default();
    let mut renderer = MemoryRenderer::new(MemoryDocument::new(), EventRegistry::new());

    for label in ["first", "second"] {
        renderer
            .mount(Target::node(root.clone()), button(recorder(&log, label)))
            .expect("render");
    }

    let node = root.child(0).expect("button");
    assert_eq!(renderer.binder().listener_count(&node, "click"), 2);
    renderer.binder().dispatch(&node, "click");
    assert_eq!(*log.borrow(), ["first:click", "second:click"]);
}

#[test]
fn the_same_handler_is_bound_once() {
    let root = MemoryNode::element("root");
    let log = Log::default();
    let handler = recorder(&log, "only");
    let mut renderer = MemoryRenderer::new(MemoryDocument::new(), EventRegistry::new());

    for _ in 0..3 {
        renderer
            .mount(Target::node(root.clone()), button(handler.clone()))
            .expect("render");
    }

    let node = root.child(0).expect("button");
    assert_eq!(renderer.binder().listener_count(&node, "click"), 1);
}

#[test]
fn input_events_carry_the_live_value() {
    let root = MemoryNode::element("root");
    let log = Log::default();
    let mut renderer = MemoryRenderer::new(MemoryDocument::new(), EventRegistry::new());
    renderer
        .mount(
            Target::node(root.clone()),
            h(
                "input",
                attrs! { "value" => "draft", "onInput" => recorder(&log, "field") },
                (),
            ),
        )
        .expect("render");

    let input = root.child(0).expect("input");
    renderer.binder().dispatch(&input, "input");
    assert_eq!(*log.borrow(), ["field:input:draft"]);
}

#[test]
fn custom_event_prefix() {
    let root = MemoryNode::element("root");
    let log = Log::default();
    let config = BindingConfig {
        event_prefix: "on:".to_owned(),
        ..BindingConfig::default()
    };
    let mut renderer = MemoryRenderer::builder(MemoryDocument::new(), EventRegistry::new())
        .with_config(config)
        .build();
    renderer
        .mount(
            Target::node(root.clone()),
            h("a", attrs! { "on:mouseOver" => recorder(&log, "link") }, "hover"),
        )
        .expect("render");

    let link = root.child(0).expect("link");
    assert_eq!(renderer.binder().dispatch(&link, "mouseover"), 1);
    assert_eq!(*log.borrow(), ["link:mouseover"]);
}

#[test]
fn handlers_on_removed_nodes_can_be_pruned() {
    let root = MemoryNode::element("root");
    let log = Log::default();
    let mut renderer = MemoryRenderer::new(MemoryDocument::new(), EventRegistry::new());
    renderer
        .mount(Target::node(root.clone()), button(recorder(&log, "gone")))
        .expect("render");
    renderer
        .mount(Target::node(root.clone()), h("p", (), "no buttons"))
        .expect("render");

    assert_eq!(renderer.binder_mut().prune(), 1);
    assert!(renderer.binder().is_empty());
}
