//! The host page's DOM, as far as the bridge needs to see it.

/// Opaque handle to an element owned by the host page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// DOM access used by the bridge.
///
/// Selectors follow CSS semantics: `query_selector_all(scope, sel)` returns
/// the descendants of `scope` matching `sel`, where ancestors named in
/// `sel` may lie outside `scope`.
pub trait Page {
    fn root(&self) -> ElementId;

    /// Whether the element is still attached to the document.
    fn contains(&self, element: ElementId) -> bool;

    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    fn query_selector_all(&self, scope: ElementId, selector: &str) -> Vec<ElementId>;

    fn query_selector(&self, scope: ElementId, selector: &str) -> Option<ElementId> {
        self.query_selector_all(scope, selector).into_iter().next()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_visible(&self, element: ElementId, visible: bool);

    /// Replace the element's children with server-rendered markup.
    fn replace_content(&self, element: ElementId, html: &str);
}
