use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::Rc,
};

use tracing::trace;

use crate::{
    env::StyleEnvironment,
    stylesheet::{StyleSheet, Subject, inherits, substitute_vars},
    theme::THEME_ATTRIBUTE,
};

// var() chains deeper than this are treated as cycles
const MAX_VAR_DEPTH: usize = 32;

// Document
//
// a headless stand-in for the browser DOM: an element tree, one stylesheet, attribute
// observers and a frame queue.  it is what the resolver runs against in tests and in the
// tokenprobe tool
//
// observers are notified synchronously once the mutation has been applied, which is the
// ordering a MutationObserver callback sees.  frames queue up until run_frame() is called,
// unless the document was built with immediate frames
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug)]
pub struct FrameHandle(u64);

#[derive(Debug)]
pub struct ObserverHandle(u64);

#[derive(Debug)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    attributes: Vec<(String, String)>,
    // inline style declarations, which outrank the stylesheet
    inline: Vec<(String, String)>,
}

struct Observer {
    targets: Vec<ElementId>,
    filter: Vec<String>,
    callback: Rc<dyn Fn()>,
}

pub struct Document {
    sheet: RefCell<StyleSheet>,
    nodes: RefCell<Vec<Node>>,
    observers: RefCell<BTreeMap<u64, Observer>>,
    frames: RefCell<BTreeMap<u64, Box<dyn FnOnce()>>>,
    next_handle: Cell<u64>,
    immediate_frames: bool,
}

struct NodeRef<'a> {
    nodes: &'a [Node],
    id: ElementId,
}

impl<'a> Subject for NodeRef<'a> {
    fn tag(&self) -> &str {
        &self.nodes[self.id.0].tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.nodes[self.id.0]
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn parent(&self) -> Option<Self> {
        self.nodes[self.id.0].parent.map(|id| NodeRef {
            nodes: self.nodes,
            id,
        })
    }
}

impl Document {
    // a document holding only <html>
    pub fn new(sheet: StyleSheet) -> Self {
        Document {
            sheet: RefCell::new(sheet),
            nodes: RefCell::new(vec![Node {
                tag: "html".to_owned(),
                parent: None,
                attributes: Vec::new(),
                inline: Vec::new(),
            }]),
            observers: RefCell::new(BTreeMap::new()),
            frames: RefCell::new(BTreeMap::new()),
            next_handle: Cell::new(0),
            immediate_frames: false,
        }
    }

    // frame requests run their callback on the spot instead of queueing
    pub fn with_immediate_frames(sheet: StyleSheet) -> Self {
        Document {
            immediate_frames: true,
            ..Document::new(sheet)
        }
    }

    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    pub fn create_element(&self, parent: ElementId, tag: &str) -> ElementId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            parent: Some(parent),
            attributes: Vec::new(),
            inline: Vec::new(),
        });
        ElementId(nodes.len() - 1)
    }

    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.nodes.borrow().get(el.0).and_then(|n| n.parent)
    }

    pub fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.nodes.borrow().get(el.0).and_then(|n| {
            n.attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        })
    }

    pub fn set_attribute(&self, el: ElementId, name: &str, value: &str) {
        {
            let mut nodes = self.nodes.borrow_mut();
            let Some(node) = nodes.get_mut(el.0) else {
                return;
            };
            match node.attributes.iter_mut().find(|(k, _)| k == name) {
                Some(entry) => entry.1 = value.to_owned(),
                None => node.attributes.push((name.to_owned(), value.to_owned())),
            }
        }
        self.notify(el, name);
    }

    pub fn remove_attribute(&self, el: ElementId, name: &str) {
        let removed = {
            let mut nodes = self.nodes.borrow_mut();
            let Some(node) = nodes.get_mut(el.0) else {
                return;
            };
            let before = node.attributes.len();
            node.attributes.retain(|(k, _)| k != name);
            node.attributes.len() != before
        };

        // removing an attribute that isn't there is not a mutation
        if removed {
            self.notify(el, name);
        }
    }

    pub fn add_class(&self, el: ElementId, class: &str) {
        let classes = match self.attribute(el, "class") {
            Some(existing) if existing.split_whitespace().any(|c| c == class) => return,
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_owned(),
        };
        self.set_attribute(el, "class", &classes);
    }

    // the equivalent of element.style.setProperty()
    pub fn set_style_property(&self, el: ElementId, name: &str, value: &str) {
        {
            let mut nodes = self.nodes.borrow_mut();
            let Some(node) = nodes.get_mut(el.0) else {
                return;
            };
            match node.inline.iter_mut().find(|(k, _)| k == name) {
                Some(entry) => entry.1 = value.to_owned(),
                None => node.inline.push((name.to_owned(), value.to_owned())),
            }
        }
        self.notify(el, "style");
    }

    // swapping stylesheets changes computed style without any attribute mutation, so
    // observers stay quiet, exactly like a late-loading <link> in a browser
    pub fn set_stylesheet(&self, sheet: StyleSheet) {
        *self.sheet.borrow_mut() = sheet;
    }

    pub fn closest_with_attribute(&self, el: ElementId, name: &str) -> Option<ElementId> {
        let mut current = Some(el);
        while let Some(id) = current {
            if self.attribute(id, name).is_some() {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    // computed value of a property, empty when it has none
    pub fn computed_value(&self, el: ElementId, name: &str) -> String {
        if el.0 >= self.nodes.borrow().len() {
            return String::new();
        }
        self.computed(el, name, 0)
    }

    fn computed(&self, el: ElementId, name: &str, depth: usize) -> String {
        if depth > MAX_VAR_DEPTH {
            return String::new();
        }

        let declared = {
            let nodes = self.nodes.borrow();
            let inline = nodes[el.0]
                .inline
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone());

            inline.or_else(|| {
                let subject = NodeRef { nodes: &nodes, id: el };
                self.sheet
                    .borrow()
                    .cascaded_value(&subject, name)
                    .map(str::to_owned)
            })
        };

        let inherited = || match (inherits(name), self.parent(el)) {
            (true, Some(parent)) => self.computed(parent, name, depth),
            _ => String::new(),
        };

        match declared.as_deref().map(str::trim) {
            None | Some("inherit") | Some("unset") => inherited(),
            Some("initial") => String::new(),
            Some(raw) => {
                let mut lookup = |var: &str| {
                    let value = self.computed(el, var, depth + 1);
                    (!value.is_empty()).then_some(value)
                };
                substitute_vars(raw, &mut lookup).unwrap_or_default()
            }
        }
    }

    // run every frame callback queued so far; callbacks queued while running wait for the next
    // frame, and ones cancelled by an earlier callback in the batch are dropped.  returns how
    // many ran
    pub fn run_frame(&self) -> usize {
        let queued: Vec<u64> = self.frames.borrow().keys().copied().collect();

        let mut count = 0;
        for handle in queued {
            // the borrow ends before the callback runs, since it may request or cancel frames
            let Some(callback) = self.frames.borrow_mut().remove(&handle) else {
                continue;
            };
            callback();
            count += 1;
        }
        count
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn live_observers(&self) -> usize {
        self.observers.borrow().len()
    }

    fn next_handle(&self) -> u64 {
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        handle
    }

    fn notify(&self, el: ElementId, attribute: &str) {
        // collect first so callbacks are free to observe, disconnect, or mutate further
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .observers
            .borrow()
            .values()
            .filter(|o| o.targets.contains(&el))
            .filter(|o| o.filter.is_empty() || o.filter.iter().any(|f| f == attribute))
            .map(|o| o.callback.clone())
            .collect();

        trace!(?el, attribute, observers = callbacks.len(), "attribute mutated");
        for callback in callbacks {
            callback();
        }
    }
}

impl StyleEnvironment for Document {
    type Element = ElementId;
    type Frame = FrameHandle;
    type Observer = ObserverHandle;

    fn document_root(&self) -> Option<ElementId> {
        Some(self.root())
    }

    fn themed_ancestor(&self, scope: &ElementId) -> Option<ElementId> {
        self.closest_with_attribute(*scope, THEME_ATTRIBUTE)
    }

    fn read_property(&self, scope: &ElementId, name: &str) -> String {
        self.computed_value(*scope, name)
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Option<FrameHandle> {
        if self.immediate_frames {
            callback();
            return None;
        }

        let handle = self.next_handle();
        self.frames.borrow_mut().insert(handle, callback);
        Some(FrameHandle(handle))
    }

    fn cancel_frame(&self, frame: FrameHandle) {
        self.frames.borrow_mut().remove(&frame.0);
    }

    fn observe_attributes(
        &self,
        targets: &[ElementId],
        filter: &[&str],
        callback: Rc<dyn Fn()>,
    ) -> Option<ObserverHandle> {
        let handle = self.next_handle();
        self.observers.borrow_mut().insert(
            handle,
            Observer {
                targets: targets.to_vec(),
                filter: filter.iter().map(|f| f.to_string()).collect(),
                callback,
            },
        );
        Some(ObserverHandle(handle))
    }

    fn disconnect(&self, observer: ObserverHandle) {
        self.observers.borrow_mut().remove(&observer.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = r#"
        :root {
          --brand: #6B4E3D;
          --on-brand: #FFFFFF;
          --space-3: 12px;
          --btn-bg: var(--brand);
          color: #222222;
        }
        [data-theme="dark"] { --brand: #A8D5BA; }
        .btn {
          background-color: var(--btn-bg);
          padding-top: var(--space-3);
          border-color: var(--missing);
          box-shadow: var(--missing, none);
        }
        .loop { --a: var(--b); --b: var(--a); }
    "#;

    fn document() -> (Document, ElementId) {
        let doc = Document::new(StyleSheet::parse(SHEET).unwrap());
        let body = doc.create_element(doc.root(), "body");
        let button = doc.create_element(body, "button");
        doc.add_class(button, "btn");
        (doc, button)
    }

    #[test]
    fn custom_properties_inherit_and_substitute() {
        let (doc, button) = document();

        assert_eq!(doc.computed_value(button, "--brand"), "#6B4E3D");
        assert_eq!(doc.computed_value(button, "background-color"), "#6B4E3D");
        assert_eq!(doc.computed_value(button, "padding-top"), "12px");
        assert_eq!(doc.computed_value(button, "color"), "#222222");
        assert_eq!(doc.computed_value(button, "border-color"), "");
        assert_eq!(doc.computed_value(button, "box-shadow"), "none");
        assert_eq!(doc.computed_value(button, "--nope"), "");
    }

    #[test]
    fn regular_properties_do_not_inherit() {
        let (doc, button) = document();
        let label = doc.create_element(button, "span");

        assert_eq!(doc.computed_value(label, "padding-top"), "");
        assert_eq!(doc.computed_value(label, "color"), "#222222");
    }

    #[test]
    fn custom_properties_substitute_where_declared() {
        let (doc, button) = document();

        // --btn-bg is computed on :root, so a local --brand doesn't leak into it
        doc.set_style_property(button, "--brand", "#000000");
        assert_eq!(doc.computed_value(button, "--btn-bg"), "#6B4E3D");
        assert_eq!(doc.computed_value(button, "--brand"), "#000000");

        doc.set_style_property(button, "--btn-bg", "transparent");
        assert_eq!(doc.computed_value(button, "background-color"), "transparent");
    }

    #[test]
    fn theme_attribute_switches_tokens() {
        let (doc, button) = document();

        doc.set_attribute(doc.root(), THEME_ATTRIBUTE, "dark");
        assert_eq!(doc.computed_value(button, "--brand"), "#A8D5BA");

        doc.remove_attribute(doc.root(), THEME_ATTRIBUTE);
        assert_eq!(doc.computed_value(button, "--brand"), "#6B4E3D");
    }

    #[test]
    fn var_cycles_resolve_to_nothing() {
        let (doc, button) = document();
        doc.add_class(button, "loop");

        assert_eq!(doc.attribute(button, "class").as_deref(), Some("btn loop"));
        assert_eq!(doc.computed_value(button, "--a"), "");
    }

    #[test]
    fn observers_are_attribute_filtered() {
        let (doc, button) = document();
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        let handle = doc
            .observe_attributes(
                &[doc.root()],
                &[THEME_ATTRIBUTE],
                Rc::new(move || counter.set(counter.get() + 1)),
            )
            .unwrap();

        doc.set_attribute(doc.root(), "lang", "en");
        doc.set_attribute(button, THEME_ATTRIBUTE, "dark");
        assert_eq!(hits.get(), 0);

        doc.set_attribute(doc.root(), THEME_ATTRIBUTE, "dark");
        doc.remove_attribute(doc.root(), THEME_ATTRIBUTE);
        doc.remove_attribute(doc.root(), THEME_ATTRIBUTE);
        assert_eq!(hits.get(), 2);

        doc.disconnect(handle);
        assert_eq!(doc.live_observers(), 0);
        doc.set_attribute(doc.root(), THEME_ATTRIBUTE, "dark");
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn frames_queue_until_run() {
        let (doc, _) = document();
        let ran = Rc::new(Cell::new(0));

        let a = ran.clone();
        let first = doc.request_frame(Box::new(move || a.set(a.get() + 1))).unwrap();
        let b = ran.clone();
        doc.request_frame(Box::new(move || b.set(b.get() + 10)));

        doc.cancel_frame(first);
        assert_eq!(doc.pending_frames(), 1);
        assert_eq!(doc.run_frame(), 1);
        assert_eq!(ran.get(), 10);
        assert_eq!(doc.run_frame(), 0);
    }

    #[test]
    fn frames_cancelled_mid_batch_do_not_run() {
        let (doc, _) = document();
        let doc = Rc::new(doc);
        let ran = Rc::new(Cell::new(0));
        let sibling: Rc<RefCell<Option<FrameHandle>>> = Rc::new(RefCell::new(None));

        let (canceller, target) = (doc.clone(), sibling.clone());
        doc.request_frame(Box::new(move || {
            if let Some(frame) = target.borrow_mut().take() {
                canceller.cancel_frame(frame);
            }
        }));
        let b = ran.clone();
        *sibling.borrow_mut() = doc.request_frame(Box::new(move || b.set(b.get() + 1)));

        let (requeue, c) = (doc.clone(), ran.clone());
        doc.request_frame(Box::new(move || {
            requeue.request_frame(Box::new(move || c.set(c.get() + 100)));
        }));

        assert_eq!(doc.run_frame(), 2);
        assert_eq!(ran.get(), 0);
        assert_eq!(doc.pending_frames(), 1);

        assert_eq!(doc.run_frame(), 1);
        assert_eq!(ran.get(), 100);
    }

    #[test]
    fn immediate_frames_run_inline() {
        let doc = Document::with_immediate_frames(StyleSheet::default());
        let ran = Rc::new(Cell::new(false));

        let flag = ran.clone();
        assert!(doc.request_frame(Box::new(move || flag.set(true))).is_none());
        assert!(ran.get());
        assert_eq!(doc.pending_frames(), 0);
    }

    #[test]
    fn closest_themed_ancestor() {
        let (doc, button) = document();
        assert_eq!(doc.themed_ancestor(&button), None);

        let body = doc.parent(button).unwrap();
        doc.set_attribute(body, THEME_ATTRIBUTE, "light");
        assert_eq!(doc.themed_ancestor(&button), Some(body));
        assert_eq!(doc.themed_ancestor(&doc.root()), None);
    }
}
