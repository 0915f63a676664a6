use log::debug;

use super::{error::DocumentError, parser::Parser};

/// Index of an element in a [`Document`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub(crate) struct Element {
    pub(crate) name: String,
    pub(crate) text: Option<String>,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

/// Arena holding the element trees of every loaded document.
///
/// Elements are never removed, so an [`ElementId`] stays valid for the
/// lifetime of the arena. Each successfully loaded document contributes one
/// root.
#[derive(Debug, Default)]
pub struct Document {
    elements: Vec<Element>,
    roots: Vec<ElementId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `source` and append its tree to the arena, returning the new
    /// root. On error the arena is left as it was.
    pub fn load_str(&mut self, source: &str) -> Result<ElementId, DocumentError> {
        let mark = self.elements.len();
        match Parser::new(source, self).parse() {
            Ok(root) => {
                debug!(
                    "loaded document <{}> with {} elements",
                    self.name(root),
                    self.elements.len() - mark
                );
                self.roots.push(root);
                Ok(root)
            }
            Err(error) => {
                self.elements.truncate(mark);
                Err(error)
            }
        }
    }

    pub(crate) fn push(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        if let Some(parent) = element.parent {
            self.elements[parent.0].children.push(id);
        }
        self.elements.push(element);
        id
    }

    pub(crate) fn append_text(&mut self, id: ElementId, text: &str) {
        match &mut self.elements[id.0].text {
            Some(existing) => existing.push_str(text),
            slot => *slot = Some(text.to_string()),
        }
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn name(&self, id: ElementId) -> &str {
        &self.elements[id.0].name
    }

    /// Trimmed character data directly inside the element, if any.
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements[id.0].text.as_deref()
    }

    /// Attribute names are stored lowercased.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements[id.0]
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements[id.0].parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.elements[id.0].children
    }

    pub fn children_named<'a>(
        &'a self,
        id: ElementId,
        name: &'a str,
    ) -> impl Iterator<Item = ElementId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.name(*child) == name)
    }

    pub fn children_prefixed<'a>(
        &'a self,
        id: ElementId,
        prefix: &'a str,
    ) -> impl Iterator<Item = ElementId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.name(*child).starts_with(prefix))
    }

    pub fn child_named(&self, id: ElementId, name: &str) -> Option<ElementId> {
        self.children_named(id, name).next()
    }

    /// Evaluate a slash-separated chain of child names starting at `id`.
    ///
    /// Each step picks the first child with that name. A step of the form
    /// `@name` ends the walk and yields that attribute of the element reached
    /// so far; otherwise the text of the last element is returned.
    pub fn eval_single(&self, id: ElementId, path: &str) -> Option<&str> {
        let mut here = id;
        for part in path.split('/') {
            if part.is_empty() {
                break;
            }
            if let Some(attribute) = part.strip_prefix('@') {
                return self.attribute(here, attribute);
            }
            here = self.child_named(here, part)?;
        }
        self.text(here)
    }

    /// True when `ancestor` is `id` itself or lies on its parent chain.
    pub fn has_ancestor(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut here = Some(id);
        while let Some(element) = here {
            if element == ancestor {
                return true;
            }
            here = self.parent(element);
        }
        false
    }

    /// The element and all its descendants in document order.
    pub fn preorder(&self, id: ElementId) -> Vec<ElementId> {
        let mut output = Vec::new();
        let mut stack = vec![id];
        while let Some(element) = stack.pop() {
            output.push(element);
            stack.extend(self.children(element).iter().rev().copied());
        }
        output
    }
}
