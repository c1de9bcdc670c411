#![forbid(unsafe_code)]

//! Clone fabrication in the DOM.

use loopdeck_core::{Sequence, Slot};
use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

use crate::error::MountError;
use crate::markers::CloneMarkers;

/// Remove whitespace text nodes between cards so item positions are exact.
pub(crate) fn strip_text_nodes(container: &Element) -> Result<usize, MountError> {
    let children = container.child_nodes();
    let text: Vec<Node> = (0..children.length())
        .filter_map(|i| children.get(i))
        .filter(|node| node.node_type() == Node::TEXT_NODE)
        .collect();
    for node in &text {
        container.remove_child(node)?;
    }
    Ok(text.len())
}

/// Items currently matching `selector` inside `container`, in document order.
pub(crate) fn items(container: &Element, selector: &str) -> Result<Vec<Element>, MountError> {
    let list = container.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn fabricate(original: &Element, markers: &CloneMarkers) -> Result<Element, MountError> {
    let clone = original
        .clone_node_with_deep(true)?
        .dyn_into::<Element>()
        .map_err(|_| MountError::Js("cloned card is not an element".into()))?;
    clone.set_class_name(&markers.rewrite(&clone.class_name()));
    Ok(clone)
}

fn original_for<'a>(originals: &'a [Element], slot: Slot) -> Result<&'a Element, MountError> {
    originals
        .get(slot.source)
        .ok_or_else(|| MountError::Js(format!("no original card {}", slot.source)))
}

/// Mount the clones of `sequence` around `originals`.
///
/// Leading clones go before the first original in slot order, trailing
/// clones are appended.
pub(crate) fn mount_clones(
    container: &Element,
    originals: &[Element],
    sequence: &Sequence,
    markers: &CloneMarkers,
) -> Result<(), MountError> {
    let Some(first) = originals.first() else {
        return Ok(());
    };
    for slot in sequence.leading_clones() {
        let clone = fabricate(original_for(originals, *slot)?, markers)?;
        container.insert_before(&clone, Some(first.as_ref()))?;
    }
    for slot in sequence.trailing_clones() {
        let clone = fabricate(original_for(originals, *slot)?, markers)?;
        container.append_child(&clone)?;
    }
    trace!(clones = sequence.clone_count(), "clones mounted");
    Ok(())
}
