#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use loopdeck_core::Mode;
use loopdeck_web::{MountError, MountSummary, PageOptions, mount_all, mount_carousel};
use pretty_assertions::assert_eq;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, Element, HtmlButtonElement, Node};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// A section holding a carousel with `cards` items (separated by whitespace
/// text) and its two triggers. Attached to the body; call `remove` after use.
fn fixture(cards: usize, container_attrs: &str) -> (Element, Element) {
    let doc = document();
    let section = doc.create_element("section").unwrap();
    let items: String = (0..cards)
        .map(|i| format!("\n  <article class=\"project-card reveal\" data-idx=\"{i}\">{i}</article>"))
        .collect();
    section.set_inner_html(&format!(
        "<button class=\"carousel-prev\">prev</button>\
         <div class=\"carousel\" {container_attrs}>{items}\n</div>\
         <button class=\"carousel-next\">next</button>"
    ));
    doc.body().unwrap().append_child(&section).unwrap();
    let container = section.query_selector(".carousel").unwrap().unwrap();
    (section, container)
}

fn children(container: &Element) -> Vec<Element> {
    let list = container.children();
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

fn idx(el: &Element) -> String {
    el.get_attribute("data-idx").unwrap()
}

fn is_clone(el: &Element) -> bool {
    el.class_list().contains("carousel-clone")
}

#[wasm_bindgen_test]
fn five_cards_are_padded_with_four_clones_each_side() {
    let (section, container) = fixture(5, "");
    assert_eq!(
        mount_carousel(&container, &PageOptions::default()).unwrap(),
        Mode::Looping
    );

    let nodes = container.child_nodes();
    assert!(
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .all(|n| n.node_type() == Node::ELEMENT_NODE)
    );

    let kids = children(&container);
    let order: Vec<String> = kids.iter().map(idx).collect();
    assert_eq!(
        order,
        ["1", "2", "3", "4", "0", "1", "2", "3", "4", "0", "1", "2", "3"]
    );
    let clones: Vec<bool> = kids.iter().map(is_clone).collect();
    assert_eq!(clones.iter().filter(|c| **c).count(), 8);
    assert!(clones[..4].iter().all(|c| *c));
    assert!(clones[9..].iter().all(|c| *c));

    for clone in kids.iter().filter(|k| is_clone(k)) {
        assert!(clone.class_list().contains("is-visible"));
        assert!(!clone.class_list().contains("reveal"));
    }
    section.remove();
}

#[wasm_bindgen_test]
fn two_cards_disable_both_triggers() {
    let (section, container) = fixture(2, "");
    assert_eq!(
        mount_carousel(&container, &PageOptions::default()).unwrap(),
        Mode::Disabled
    );
    for sel in [".carousel-prev", ".carousel-next"] {
        let button: HtmlButtonElement = section
            .query_selector(sel)
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();
        assert!(button.disabled());
    }
    assert_eq!(children(&container).len(), 2);
    section.remove();
}

#[wasm_bindgen_test]
fn empty_container_is_left_alone() {
    let (section, container) = fixture(0, "");
    assert_eq!(
        mount_carousel(&container, &PageOptions::default()).unwrap(),
        Mode::Inert
    );
    let button: HtmlButtonElement = section
        .query_selector(".carousel-next")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    assert!(!button.disabled());
    section.remove();
}

#[wasm_bindgen_test]
fn missing_trigger_is_reported() {
    let (section, container) = fixture(5, "");
    let mut options = PageOptions::default();
    options.selectors.next = ".no-such-trigger".to_owned();
    let err = mount_carousel(&container, &options).unwrap_err();
    assert!(matches!(err, MountError::MissingTrigger(ref s) if s == ".no-such-trigger"));
    assert_eq!(children(&container).len(), 5);
    section.remove();
}

#[wasm_bindgen_test]
fn data_attributes_override_clone_cap() {
    let (section, container) = fixture(5, "data-loop-max-clones=\"2\"");
    assert_eq!(
        mount_carousel(&container, &PageOptions::default()).unwrap(),
        Mode::Looping
    );
    let order: Vec<String> = children(&container).iter().map(idx).collect();
    assert_eq!(order, ["3", "4", "0", "1", "2", "3", "4", "0", "1"]);
    section.remove();
}

#[wasm_bindgen_test]
fn malformed_data_attribute_is_a_config_error() {
    let (section, container) = fixture(5, "data-loop-lock-ms=\"soon\"");
    let err = mount_carousel(&container, &PageOptions::default()).unwrap_err();
    assert!(matches!(err, MountError::Config(_)));
    section.remove();
}

#[wasm_bindgen_test]
fn mount_all_observes_originals_but_not_clones() {
    let (section, container) = fixture(5, "id=\"featured-carousel\"");
    let form = document().create_element("form").unwrap();
    form.set_class_name("filters");
    form.set_inner_html("<input name=\"texto\">");
    section.append_child(&form).unwrap();

    let summary = mount_all(&PageOptions::default()).unwrap();
    assert_eq!(
        summary,
        MountSummary {
            carousels: 1,
            disabled: 0,
            reveal_targets: 5,
            filter: true,
        }
    );
    assert_eq!(children(&container).len(), 13);
    section.remove();
}
