//! Thin helpers over the `markup5ever_rcdom` tree.
//!
//! Building: elements and text nodes are created detached and appended by hand,
//! then serialized one subtree at a time with `html5ever`'s serializer (which
//! takes care of escaping). Reading: documents are parsed with the WHATWG
//! parser, so malformed markup is repaired rather than rejected.

use crate::error::ConvertError;
use html5ever::tendril::TendrilSink;
use html5ever::{
    ns, parse_document, serialize, serialize::SerializeOpts, serialize::TraversalScope,
    Attribute, LocalName, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Create an HTML element with attributes
pub(crate) fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create an element whose only attribute is an optional class.
pub(crate) fn create_styled(tag: &str, class: Option<&str>) -> Handle {
    match class {
        Some(class) => create_element(tag, vec![("class", class)]),
        None => create_element(tag, vec![]),
    }
}

/// Create a text node
pub(crate) fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

pub(crate) fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Serialize one element (and its subtree) to an HTML string.
pub(crate) fn serialize_node(node: &Handle) -> Result<String, ConvertError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| ConvertError::Serialization(format!("HTML serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| ConvertError::Serialization(format!("UTF-8 conversion failed: {e}")))
}

/// Parse an HTML string (full document or fragment) into a DOM.
pub(crate) fn parse_html_document(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// Local tag name of an element, `None` for other node kinds.
pub(crate) fn tag_name(handle: &Handle) -> Option<String> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref().to_string()),
        _ => None,
    }
}

/// Value of an attribute on an element.
pub(crate) fn attr(handle: &Handle, key: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == key)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Depth-first search for the first element with the given tag.
pub(crate) fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    let mut stack = vec![handle.clone()];
    while let Some(node) = stack.pop() {
        if tag_name(&node).as_deref() == Some(tag) {
            return Some(node);
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    None
}

/// Concatenated text of all descendant text nodes. `<br>` counts as a newline.
pub(crate) fn text_content(handle: &Handle) -> String {
    let mut out = String::new();
    let mut stack = vec![handle.clone()];
    while let Some(node) = stack.pop() {
        match &node.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { name, .. } if name.local.as_ref() == "br" => out.push('\n'),
            _ => stack.extend(node.children.borrow().iter().rev().cloned()),
        }
    }
    out
}
