//! Nullable page: an in-memory element tree with a small selector engine.
//!
//! Supported selectors: `tag`, `#id`, `.class`, `[attr]`, `[attr=value]`,
//! compounds of those (`button[data-endpoint]`) and the descendant
//! combinator (whitespace).

use std::cell::RefCell;
use std::collections::BTreeMap;

use bridge_wallet_core::{ElementId, Page};

/// Description of an element to append.
#[derive(Clone, Debug, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }
}

#[derive(Debug)]
struct Node {
    spec: ElementSpec,
    visible: bool,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    html: Option<String>,
}

/// A test page.
///
/// Element 0 is the document body. Removed elements keep their slot so ids
/// are never reused.
pub struct NullPage {
    nodes: RefCell<Vec<Option<Node>>>,
}

impl NullPage {
    pub fn new() -> Self {
        let body = Node {
            spec: ElementSpec::new("body"),
            visible: true,
            parent: None,
            children: Vec::new(),
            html: None,
        };
        Self {
            nodes: RefCell::new(vec![Some(body)]),
        }
    }

    /// Append a child to `parent`. Panics if `parent` was removed.
    pub fn append(&self, parent: ElementId, spec: ElementSpec) -> ElementId {
        let mut nodes = self.nodes.borrow_mut();
        let id = ElementId(nodes.len() as u64);
        nodes[index(parent)]
            .as_mut()
            .expect("parent element was removed")
            .children
            .push(id);
        nodes.push(Some(Node {
            spec,
            visible: true,
            parent: Some(parent),
            children: Vec::new(),
            html: None,
        }));
        id
    }

    pub fn is_visible(&self, element: ElementId) -> bool {
        self.with_node(element, |n| n.visible).unwrap_or(false)
    }

    /// Markup last swapped into `element`.
    pub fn content(&self, element: ElementId) -> Option<String> {
        self.with_node(element, |n| n.html.clone()).flatten()
    }

    pub fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.with_node(element, |n| n.children.clone())
            .unwrap_or_default()
    }

    fn with_node<T>(&self, element: ElementId, f: impl FnOnce(&Node) -> T) -> Option<T> {
        self.nodes
            .borrow()
            .get(index(element))
            .and_then(|n| n.as_ref())
            .map(f)
    }

    fn remove_subtree(nodes: &mut [Option<Node>], element: ElementId) {
        if let Some(node) = nodes[index(element)].take() {
            for child in node.children {
                Self::remove_subtree(nodes, child);
            }
        }
    }

    fn descendants(nodes: &[Option<Node>], scope: ElementId, out: &mut Vec<ElementId>) {
        if let Some(node) = nodes.get(index(scope)).and_then(|n| n.as_ref()) {
            for &child in &node.children {
                out.push(child);
                Self::descendants(nodes, child, out);
            }
        }
    }
}

impl Default for NullPage {
    fn default() -> Self {
        Self::new()
    }
}

fn index(element: ElementId) -> usize {
    element.0 as usize
}

impl Page for NullPage {
    fn root(&self) -> ElementId {
        ElementId(0)
    }

    fn contains(&self, element: ElementId) -> bool {
        self.with_node(element, |_| ()).is_some()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.query_selector(self.root(), &format!("#{id}"))
    }

    fn query_selector_all(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        let nodes = self.nodes.borrow();
        let mut candidates = Vec::new();
        Self::descendants(&nodes, scope, &mut candidates);
        let matched: Vec<ElementId> = candidates
            .into_iter()
            .filter(|&e| selector.matches(&nodes, e))
            .collect();
        matched
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.with_node(element, |n| match name {
            "id" => n.spec.id.clone(),
            "class" => (!n.spec.classes.is_empty()).then(|| n.spec.classes.join(" ")),
            _ => n.spec.attrs.get(name).cloned(),
        })
        .flatten()
    }

    fn set_visible(&self, element: ElementId, visible: bool) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(node) = nodes.get_mut(index(element)).and_then(|n| n.as_mut()) {
            node.visible = visible;
        }
    }

    fn replace_content(&self, element: ElementId, html: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let Some(children) = nodes
            .get_mut(index(element))
            .and_then(|n| n.as_mut())
            .map(|n| std::mem::take(&mut n.children))
        else {
            return;
        };
        for child in children {
            Self::remove_subtree(&mut nodes, child);
        }
        if let Some(node) = nodes[index(element)].as_mut() {
            node.html = Some(html.to_string());
        }
    }
}

// ── Selectors ───────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

#[derive(Debug, PartialEq)]
struct Selector(Vec<Compound>);

impl Selector {
    fn parse(s: &str) -> Option<Self> {
        let parts = s
            .split_whitespace()
            .map(Compound::parse)
            .collect::<Option<Vec<_>>>()?;
        (!parts.is_empty()).then_some(Self(parts))
    }

    /// Right to left: the last compound matches `element`, earlier ones
    /// match successive ancestors.
    fn matches(&self, nodes: &[Option<Node>], element: ElementId) -> bool {
        let Some((last, rest)) = self.0.split_last() else {
            return false;
        };
        let Some(node) = nodes.get(index(element)).and_then(|n| n.as_ref()) else {
            return false;
        };
        if !last.matches(node) {
            return false;
        }

        let mut ancestor = node.parent;
        for compound in rest.iter().rev() {
            loop {
                let Some(id) = ancestor else {
                    return false;
                };
                let Some(node) = nodes[index(id)].as_ref() else {
                    return false;
                };
                ancestor = node.parent;
                if compound.matches(node) {
                    break;
                }
            }
        }
        true
    }
}

impl Compound {
    fn parse(s: &str) -> Option<Self> {
        let mut compound = Compound::default();
        let mut rest = s;

        let tag_len = rest.find(&['#', '.', '['][..]).unwrap_or(rest.len());
        if tag_len > 0 {
            compound.tag = Some(rest[..tag_len].to_ascii_lowercase());
        }
        rest = &rest[tag_len..];

        while let Some(sigil) = rest.chars().next() {
            rest = &rest[sigil.len_utf8()..];
            match sigil {
                '#' | '.' => {
                    let len = rest.find(&['#', '.', '['][..]).unwrap_or(rest.len());
                    if len == 0 {
                        return None;
                    }
                    let name = rest[..len].to_string();
                    if sigil == '#' {
                        compound.id = Some(name);
                    } else {
                        compound.classes.push(name);
                    }
                    rest = &rest[len..];
                }
                '[' => {
                    let end = rest.find(']')?;
                    let body = &rest[..end];
                    let attr = match body.split_once('=') {
                        Some((name, value)) => (
                            name.trim().to_string(),
                            Some(value.trim().trim_matches(&['"', '\''][..]).to_string()),
                        ),
                        None => (body.trim().to_string(), None),
                    };
                    if attr.0.is_empty() {
                        return None;
                    }
                    compound.attrs.push(attr);
                    rest = &rest[end + 1..];
                }
                _ => return None,
            }
        }
        Some(compound)
    }

    fn matches(&self, node: &Node) -> bool {
        let spec = &node.spec;
        if self.tag.as_ref().is_some_and(|t| *t != spec.tag) {
            return false;
        }
        if self.id.is_some() && self.id != spec.id {
            return false;
        }
        if !self.classes.iter().all(|c| spec.classes.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|(name, value)| {
            let actual = match name.as_str() {
                "id" => spec.id.clone(),
                _ => spec.attrs.get(name).cloned(),
            };
            match (actual, value) {
                (Some(actual), Some(expected)) => actual == *expected,
                (Some(_), None) => true,
                (None, _) => false,
            }
        })
    }
}
