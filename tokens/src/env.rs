use std::{fmt::Debug, marker::PhantomData, rc::Rc};

// StyleEnvironment
//
// everything the resolver needs from its host: a way to find the document root and the
// nearest themed wrapper, a way to read computed style, a way to defer one read to the next
// frame, and a way to watch attributes.  the browser, the headless document, and "no DOM at
// all" each implement this
//
// the host is single threaded, so callbacks are plain Rc/Box closures and may be invoked from
// within the very call that registers them (an immediate frame scheduler does exactly that)
pub trait StyleEnvironment {
    type Element: Clone + Debug + PartialEq + 'static;

    // handle for a pending deferred callback
    type Frame;

    // handle for a live attribute observer
    type Observer;

    fn document_root(&self) -> Option<Self::Element>;

    // nearest inclusive ancestor of scope carrying the theme attribute
    fn themed_ancestor(&self, scope: &Self::Element) -> Option<Self::Element>;

    // computed value of a custom or regular property, empty if there is none
    fn read_property(&self, scope: &Self::Element, name: &str) -> String;

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Option<Self::Frame>;

    fn cancel_frame(&self, frame: Self::Frame);

    // a single observer covering every target, notified only for attributes in the filter
    fn observe_attributes(
        &self,
        targets: &[Self::Element],
        filter: &[&str],
        callback: Rc<dyn Fn()>,
    ) -> Option<Self::Observer>;

    fn disconnect(&self, observer: Self::Observer);
}

impl<T: StyleEnvironment + ?Sized> StyleEnvironment for Rc<T> {
    type Element = T::Element;
    type Frame = T::Frame;
    type Observer = T::Observer;

    fn document_root(&self) -> Option<Self::Element> {
        (**self).document_root()
    }

    fn themed_ancestor(&self, scope: &Self::Element) -> Option<Self::Element> {
        (**self).themed_ancestor(scope)
    }

    fn read_property(&self, scope: &Self::Element, name: &str) -> String {
        (**self).read_property(scope, name)
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Option<Self::Frame> {
        (**self).request_frame(callback)
    }

    fn cancel_frame(&self, frame: Self::Frame) {
        (**self).cancel_frame(frame)
    }

    fn observe_attributes(
        &self,
        targets: &[Self::Element],
        filter: &[&str],
        callback: Rc<dyn Fn()>,
    ) -> Option<Self::Observer> {
        (**self).observe_attributes(targets, filter, callback)
    }

    fn disconnect(&self, observer: Self::Observer) {
        (**self).disconnect(observer)
    }
}

// Detached
//
// the environment components see when they render somewhere without a DOM (before hydration,
// or in a native test).  there is no root, so the resolver never registers anything
#[derive(Debug)]
pub struct Detached<E> {
    _element: PhantomData<E>,
}

impl<E> Detached<E> {
    pub fn new() -> Self {
        Detached {
            _element: PhantomData,
        }
    }
}

impl<E> Default for Detached<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone + Debug + PartialEq + 'static> StyleEnvironment for Detached<E> {
    type Element = E;
    type Frame = ();
    type Observer = ();

    fn document_root(&self) -> Option<E> {
        None
    }

    fn themed_ancestor(&self, _scope: &E) -> Option<E> {
        None
    }

    fn read_property(&self, _scope: &E, _name: &str) -> String {
        String::new()
    }

    fn request_frame(&self, _callback: Box<dyn FnOnce()>) -> Option<()> {
        None
    }

    fn cancel_frame(&self, _frame: ()) {}

    fn observe_attributes(&self, _targets: &[E], _filter: &[&str], _callback: Rc<dyn Fn()>) -> Option<()> {
        None
    }

    fn disconnect(&self, _observer: ()) {}
}
