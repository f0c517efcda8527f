//! End-to-end tests for the managed-runtime strategies, including the
//! entry-type learner.

mod common;

use std::rc::Rc;

use common::MockObject;
use lens_core::strategies::managed::entry_descriptor;
use lens_core::{register_managed_visualizers, DisplayHint, Registry, TypeDescriptor, ValueHandle};

fn managed_registry() -> Rc<Registry>
{
    common::init_test_logging();
    let registry = Rc::new(Registry::new());
    register_managed_visualizers(&registry);
    registry
}

#[test]
fn test_string_convertible_invokes_to_string()
{
    let value = MockObject::string("java.lang.StringBuilder", "abc");

    let registry = managed_registry();
    let visualizer = registry.find(&value).expect("string builder should match");

    assert_eq!(visualizer.summary(), "\"abc\"");
    assert!(visualizer.children().is_none());
}

#[test]
fn test_file_invokes_get_path()
{
    let value = MockObject::string("java.io.File", "/var/log/app.log");

    let registry = managed_registry();
    let visualizer = registry.find(&value).expect("file should match");

    assert_eq!(visualizer.summary(), "\"/var/log/app.log\"");
}

#[test]
fn test_throwable_invokes_get_message()
{
    let value = MockObject::string("java.lang.Throwable", "boom");

    let registry = managed_registry();
    let visualizer = registry.find(&value).expect("throwable should match");

    assert_eq!(visualizer.summary(), "\"boom\"");
}

#[test]
fn test_indexed_container_enumerates_by_get()
{
    let value = MockObject::list(
        "java.util.ArrayList",
        (1..=5).map(MockObject::Int).collect(),
    );

    let registry = managed_registry();
    let visualizer = registry.find(&value).expect("list should match");

    assert_eq!(visualizer.summary(), "java.util.ArrayList (size 5)");
    assert_eq!(visualizer.display_hint(), DisplayHint::Array);

    let mut children = visualizer.children().expect("list exposes children");
    assert!(children.element_type().is_none());
    for index in 0..5 {
        let child = children.advance().expect("list element");
        assert_eq!(child.label, format!("[{index}]"));
        assert_eq!(child.value.as_i64().unwrap(), index + 1);
    }
    assert!(children.advance().is_none());

    // Element type is captured from the first child for the host to reuse.
    let element = children.element_type().expect("captured element type");
    assert_eq!(element.name().as_deref(), Some("int"));
}

#[test]
fn test_iterable_container_enumerates_by_iterator()
{
    let value = MockObject::collection(
        "java.util.HashSet",
        vec![MockObject::Int(10), MockObject::Int(20), MockObject::Int(30)],
    );

    let registry = managed_registry();
    let visualizer = registry.find(&value).expect("set should match");

    assert_eq!(visualizer.display_hint(), DisplayHint::Array);

    let mut children = visualizer.children().expect("set exposes children");
    let mut seen = Vec::new();
    while let Some(child) = children.advance() {
        seen.push((child.label, child.value.as_i64().unwrap()));
    }
    assert_eq!(
        seen,
        [
            ("[0]".to_string(), 10),
            ("[1]".to_string(), 20),
            ("[2]".to_string(), 30),
        ]
    );
}

fn sample_map() -> MockObject
{
    MockObject::map(
        "java.util.HashMap",
        "java.util.HashMap$Node",
        vec![
            (MockObject::string("java.lang.String", "alpha"), MockObject::Int(1)),
            (MockObject::string("java.lang.String", "beta"), MockObject::Int(2)),
        ],
    )
}

#[test]
fn test_associative_container_learns_entry_type()
{
    let registry = managed_registry();
    let baseline = registry.len();
    assert!(!registry.entry_type_learned("java.util.HashMap"));

    let visualizer = registry.find(&sample_map()).expect("map should match");
    assert_eq!(visualizer.display_hint(), DisplayHint::MapLike);

    let mut children = visualizer.children().expect("map exposes children");
    let first = children.advance().expect("first entry");
    assert_eq!(first.label, "[0]");

    // The first enumeration teaches the registry the concrete entry type.
    assert!(registry.entry_type_learned("java.util.HashMap"));
    assert_eq!(registry.len(), baseline + 1);

    let second = children.advance().expect("second entry");
    assert_eq!(second.label, "[1]");
    assert!(children.advance().is_none());

    // An entry value encountered on its own now dispatches to the learned
    // decomposition strategy.
    let entry = registry.find(first.value.as_ref()).expect("entry should now match");
    assert_eq!(entry.summary(), "'alpha' -> 1");
}

#[test]
fn test_entry_decomposition_children_and_quote_normalization()
{
    let registry = managed_registry();
    let entry_value = MockObject::entry(
        "java.util.HashMap$Node",
        MockObject::string("java.lang.String", "alpha"),
        MockObject::string("java.lang.String", "one"),
    );
    registry.learn_entry_type(
        "java.util.HashMap",
        "java.util.HashMap$Node",
        entry_descriptor("java.util.HashMap$Node"),
    );

    let visualizer = registry.find(&entry_value).expect("entry should match");

    // Quotes from the runtime's string rendering are normalized to single
    // quotes in the combined summary.
    assert_eq!(visualizer.summary(), "'alpha' -> 'one'");
    assert_eq!(visualizer.display_hint(), DisplayHint::MapLike);

    let mut children = visualizer.children().expect("entry exposes children");
    let key = children.advance().expect("key side");
    assert_eq!(key.label, "key");
    assert_eq!(key.value.display_string().unwrap(), "\"alpha\"");
    let value = children.advance().expect("value side");
    assert_eq!(value.label, "value");
    assert_eq!(value.value.display_string().unwrap(), "\"one\"");
    assert!(children.advance().is_none());
}

#[test]
fn test_entry_with_failing_key_stays_exhausted()
{
    let registry = Registry::new();
    registry.register(entry_descriptor("java.util.HashMap$Node"));

    // Answers neither getKey nor getValue, so the first pull fails.
    let value = MockObject::string("java.util.HashMap$Node", "not an entry");
    let visualizer = registry.find(&value).expect("entry should match");

    let mut children = visualizer.children().expect("entry exposes children");
    assert!(children.advance().is_none());
    // A failed key ends the sequence for good; no value side may surface
    // after the cursor has reported exhaustion.
    assert!(children.advance().is_none());
    assert!(children.advance().is_none());
}

#[test]
fn test_second_enumeration_does_not_relearn()
{
    let registry = managed_registry();
    let visualizer = registry.find(&sample_map()).expect("map should match");

    let mut first_pass = visualizer.children().expect("map exposes children");
    while first_pass.advance().is_some() {}
    let learned_len = registry.len();

    // A later enumeration sees the type already learned and leaves the
    // registry untouched.
    let mut second_pass = visualizer.children().expect("map exposes children");
    while second_pass.advance().is_some() {}
    assert_eq!(registry.len(), learned_len);
}

#[test]
#[should_panic(expected = "learned twice")]
fn test_double_learn_panics()
{
    let registry = Registry::new();
    registry.learn_entry_type("java.util.HashMap", "java.util.HashMap$Node", entry_descriptor("a"));
    registry.learn_entry_type("java.util.HashMap", "java.util.HashMap$Node", entry_descriptor("b"));
}

#[test]
fn test_empty_container_yields_no_children()
{
    let registry = managed_registry();
    let visualizer = registry
        .find(&MockObject::list("java.util.LinkedList", Vec::new()))
        .expect("list should match");

    assert!(visualizer.children().expect("children protocol").advance().is_none());
}
