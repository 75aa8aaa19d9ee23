use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use tracing::{debug, trace};

use crate::{
    env::StyleEnvironment, request::ResolutionRequest, snapshot::ResolvedSnapshot,
    theme::THEME_ATTRIBUTE,
};

// read every requested name off the scope in one pass
//
// tokens come first, then regular properties, and everything is trimmed and defaulted to the
// unset sentinel by the snapshot itself
pub fn read_snapshot<S>(
    env: &S,
    scope: &S::Element,
    request: &ResolutionRequest<S::Element>,
) -> ResolvedSnapshot
where
    S: StyleEnvironment + ?Sized,
{
    let mut snapshot = ResolvedSnapshot::new();
    for name in request.names() {
        snapshot.insert(name, &env.read_property(scope, name));
    }

    trace!(entries = snapshot.len(), "read token snapshot");
    snapshot
}

// TokenResolver
//
// keeps one component's snapshot fresh.  an activation consists of a single attribute observer
// (on the document root, plus the scope's nearest themed wrapper if that's something else) and
// a single deferred read on the next frame.  every change of request tears the old activation
// down before building the new one
//
// callbacks hold a weak reference and the generation they were issued under; anything that
// fires after its activation was replaced is dropped on the floor
pub struct TokenResolver<E: StyleEnvironment> {
    inner: Rc<Inner<E>>,
}

struct Inner<E: StyleEnvironment> {
    env: E,
    state: RefCell<State<E>>,
    on_change: Box<dyn Fn(Option<ResolvedSnapshot>)>,
}

struct State<E: StyleEnvironment> {
    generation: u64,
    request: Option<ResolutionRequest<E::Element>>,
    scope: Option<E::Element>,
    frame: Option<E::Frame>,
    observer: Option<E::Observer>,
    snapshot: Option<ResolvedSnapshot>,
}

impl<E: StyleEnvironment + 'static> TokenResolver<E> {
    // on_change sees every new snapshot, and None whenever a snapshot is discarded
    pub fn new<F>(env: E, on_change: F) -> Self
    where
        F: Fn(Option<ResolvedSnapshot>) + 'static,
    {
        TokenResolver {
            inner: Rc::new(Inner {
                env,
                state: RefCell::new(State {
                    generation: 0,
                    request: None,
                    scope: None,
                    frame: None,
                    observer: None,
                    snapshot: None,
                }),
                on_change: Box::new(on_change),
            }),
        }
    }

    pub fn snapshot(&self) -> Option<ResolvedSnapshot> {
        self.inner.state.borrow().snapshot.clone()
    }

    pub fn is_active(&self) -> bool {
        self.inner.state.borrow().request.is_some()
    }

    pub fn resolve(&self, request: ResolutionRequest<E::Element>) {
        if !request.enabled {
            self.release();
            return;
        }

        if self.inner.state.borrow().request.as_ref() == Some(&request) {
            return;
        }

        // a fresh activation starts from loading, whatever the last one had
        if self.inner.teardown() {
            (self.inner.on_change)(None);
        }

        let env = &self.inner.env;
        let scope = request.effective_scope(env);

        let generation = {
            let mut state = self.inner.state.borrow_mut();
            state.generation += 1;
            state.request = Some(request);
            state.scope = scope.clone();
            state.generation
        };

        let Some(scope) = scope else {
            debug!("no document to read from, resolver stays idle");
            return;
        };

        let mut targets: Vec<E::Element> = env.document_root().into_iter().collect();
        if let Some(themed) = env.themed_ancestor(&scope) {
            if !targets.contains(&themed) {
                targets.push(themed);
            }
        }

        debug!(?scope, observed = targets.len(), generation, "activating token resolver");

        let weak = Rc::downgrade(&self.inner);
        let observer = env.observe_attributes(
            &targets,
            &[THEME_ATTRIBUTE],
            Rc::new(move || Inner::refresh(&weak, generation)),
        );
        if !self.inner.keep(generation, |state| state.observer = observer) {
            return;
        }

        let weak = Rc::downgrade(&self.inner);
        let frame = env.request_frame(Box::new(move || Inner::refresh(&weak, generation)));
        self.inner.keep(generation, |state| state.frame = frame);
    }

    // drop the activation and the snapshot, leaving nothing registered
    pub fn release(&self) {
        if self.inner.teardown() {
            debug!("token resolver released");
            (self.inner.on_change)(None);
        }
    }
}

impl<E: StyleEnvironment> Inner<E> {
    // cancel whatever is registered and forget the request.  returns whether a snapshot was
    // discarded
    fn teardown(&self) -> bool {
        let (frame, observer, discarded) = {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.request = None;
            state.scope = None;
            (
                state.frame.take(),
                state.observer.take(),
                state.snapshot.take().is_some(),
            )
        };

        if let Some(frame) = frame {
            self.env.cancel_frame(frame);
        }
        if let Some(observer) = observer {
            self.env.disconnect(observer);
        }

        discarded
    }

    // store a freshly registered handle, unless the activation it belongs to was replaced
    // while it was being registered (an immediate callback can do that), in which case it is
    // released again.  returns whether the activation is still current
    fn keep(&self, generation: u64, store: impl FnOnce(&mut State<E>)) -> bool {
        let mut state = self.state.borrow_mut();
        if state.generation == generation {
            store(&mut state);
            return true;
        }

        let mut stale = State {
            generation,
            request: None,
            scope: None,
            frame: None,
            observer: None,
            snapshot: None,
        };
        drop(state);

        store(&mut stale);
        if let Some(frame) = stale.frame {
            self.env.cancel_frame(frame);
        }
        if let Some(observer) = stale.observer {
            self.env.disconnect(observer);
        }
        false
    }

    fn refresh(weak: &Weak<Inner<E>>, generation: u64) {
        let Some(inner) = weak.upgrade() else {
            return;
        };

        let (scope, request) = {
            let state = inner.state.borrow();
            if state.generation != generation {
                trace!(generation, "discarding stale token read");
                return;
            }
            match (&state.scope, &state.request) {
                (Some(scope), Some(request)) => (scope.clone(), request.clone()),
                _ => return,
            }
        };

        let snapshot = read_snapshot(&inner.env, &scope, &request);

        {
            let mut state = inner.state.borrow_mut();
            if state.generation != generation {
                return;
            }
            state.snapshot = Some(snapshot.clone());
        }

        (inner.on_change)(Some(snapshot));
    }
}

impl<E: StyleEnvironment> Drop for TokenResolver<E> {
    fn drop(&mut self) {
        self.inner.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{
        UNSET,
        document::{Document, ElementId},
        env::Detached,
        stylesheet::StyleSheet,
        theme::Theme,
    };

    const SHEET: &str = r#"
        :root { --brand: #6B4E3D; --space-4: 16px; }
        [data-theme="dark"] { --brand: #A8D5BA; }
        .left { --brand: #111111; }
        .btn { background-color: var(--brand); padding-top: var(--space-4); }
    "#;

    type Log = Rc<RefCell<Vec<Option<ResolvedSnapshot>>>>;

    fn setup(sheet: &str) -> (Rc<Document>, TokenResolver<Rc<Document>>, Log) {
        let doc = Rc::new(Document::new(StyleSheet::parse(sheet).unwrap()));
        let log: Log = Rc::new(RefCell::new(Vec::new()));

        let sink = log.clone();
        let resolver = TokenResolver::new(doc.clone(), move |s| sink.borrow_mut().push(s));

        (doc, resolver, log)
    }

    fn request(tokens: &[&str], props: &[&str]) -> ResolutionRequest<ElementId> {
        ResolutionRequest::new(tokens.iter().copied(), props.iter().copied())
    }

    fn set_theme(doc: &Document, el: ElementId, theme: Theme) {
        doc.set_attribute(el, THEME_ATTRIBUTE, theme.as_attribute());
    }

    fn brand(resolver: &TokenResolver<Rc<Document>>) -> Option<String> {
        resolver
            .snapshot()
            .and_then(|s| s.get("--brand").map(str::to_owned))
    }

    #[test]
    fn resolves_root_tokens_after_first_frame() {
        let (doc, resolver, log) = setup(SHEET);

        resolver.resolve(request(&["--brand"], &[]));
        assert_eq!(resolver.snapshot(), None);
        assert_eq!(doc.pending_frames(), 1);
        assert_eq!(doc.live_observers(), 1);

        doc.run_frame();

        let expected: ResolvedSnapshot = [("--brand", "#6B4E3D")].into_iter().collect();
        assert_eq!(resolver.snapshot(), Some(expected.clone()));
        assert_eq!(*log.borrow(), vec![Some(expected)]);
    }

    #[test]
    fn theme_toggle_refreshes_without_remount() {
        let (doc, resolver, log) = setup(SHEET);

        resolver.resolve(request(&["--brand"], &[]));
        doc.run_frame();

        set_theme(&doc, doc.root(), Theme::Dark);
        assert_eq!(brand(&resolver).as_deref(), Some("#A8D5BA"));

        doc.remove_attribute(doc.root(), THEME_ATTRIBUTE);
        assert_eq!(brand(&resolver).as_deref(), Some("#6B4E3D"));
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn unknown_names_are_unset() {
        let (doc, resolver, _) = setup(SHEET);

        resolver.resolve(request(&["--does-not-exist"], &["not-a-property"]));
        doc.run_frame();

        let snapshot = resolver.snapshot().unwrap();
        assert_eq!(snapshot.get("--does-not-exist"), Some(UNSET));
        assert_eq!(snapshot.get("not-a-property"), Some(UNSET));
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn snapshot_keeps_request_order() {
        let (doc, resolver, _) = setup(":root { --a: 1px; --b: 2px; }");

        resolver.resolve(request(&["--b", "--a"], &[]));
        doc.run_frame();

        let snapshot = resolver.snapshot().unwrap();
        assert_eq!(snapshot.keys().collect::<Vec<_>>(), vec!["--b", "--a"]);
    }

    #[test]
    fn reads_are_deterministic() {
        let doc = Document::new(StyleSheet::parse(SHEET).unwrap());
        let button = doc.create_element(doc.root(), "button");
        doc.add_class(button, "btn");

        let req = request(&["--brand", "--space-4"], &["background-color", "padding-top"]);
        let first = read_snapshot(&doc, &button, &req);
        let second = read_snapshot(&doc, &button, &req);

        assert_eq!(first, second);
        assert_eq!(first.get("background-color"), Some("#6B4E3D"));
        assert_eq!(first.get("padding-top"), Some("16px"));
    }

    #[test]
    fn disabling_clears_and_stops_listening() {
        let (doc, resolver, log) = setup(SHEET);

        resolver.resolve(request(&["--brand"], &[]));
        doc.run_frame();
        assert!(resolver.snapshot().is_some());

        resolver.resolve(request(&["--brand"], &[]).enabled(false));
        assert_eq!(resolver.snapshot(), None);
        assert!(!resolver.is_active());
        assert_eq!(doc.live_observers(), 0);
        assert_eq!(doc.pending_frames(), 0);

        let seen = log.borrow().len();
        assert_eq!(log.borrow().last(), Some(&None));

        set_theme(&doc, doc.root(), Theme::Dark);
        doc.run_frame();
        assert_eq!(log.borrow().len(), seen);
        assert_eq!(resolver.snapshot(), None);
    }

    #[test]
    fn reenabling_attaches_fresh_observation() {
        let (doc, resolver, _) = setup(SHEET);

        resolver.resolve(request(&["--brand"], &[]));
        doc.run_frame();
        resolver.release();

        set_theme(&doc, doc.root(), Theme::Dark);
        resolver.resolve(request(&["--brand"], &[]));
        assert_eq!(doc.live_observers(), 1);

        doc.run_frame();
        assert_eq!(brand(&resolver).as_deref(), Some("#A8D5BA"));
    }

    #[test]
    fn scope_change_moves_observation_to_the_new_scope() {
        let (doc, resolver, _) = setup(SHEET);
        let body = doc.create_element(doc.root(), "body");
        let left = doc.create_element(body, "div");
        doc.add_class(left, "left");
        let right = doc.create_element(body, "div");

        resolver.resolve(request(&["--brand"], &[]).with_scope(Some(left)));
        doc.run_frame();
        assert_eq!(brand(&resolver).as_deref(), Some("#111111"));

        resolver.resolve(request(&["--brand"], &[]).with_scope(Some(right)));
        assert_eq!(resolver.snapshot(), None);
        assert_eq!(doc.live_observers(), 1);

        // toggle before the deferred read lands; the observer for the new scope answers
        set_theme(&doc, doc.root(), Theme::Dark);
        assert_eq!(brand(&resolver).as_deref(), Some("#A8D5BA"));

        doc.run_frame();
        assert_eq!(brand(&resolver).as_deref(), Some("#A8D5BA"));
    }

    #[test]
    fn stale_deferred_reads_are_cancelled() {
        let (doc, resolver, log) = setup(SHEET);
        let left = doc.create_element(doc.root(), "div");
        doc.add_class(left, "left");

        resolver.resolve(request(&["--brand"], &[]).with_scope(Some(left)));
        resolver.resolve(request(&["--brand"], &[]));
        assert_eq!(doc.pending_frames(), 1);
        assert_eq!(doc.live_observers(), 1);

        doc.run_frame();
        assert_eq!(brand(&resolver).as_deref(), Some("#6B4E3D"));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn changed_names_reactivate() {
        let (doc, resolver, _) = setup(SHEET);

        resolver.resolve(request(&["--brand"], &[]));
        doc.run_frame();

        resolver.resolve(request(&["--brand", "--space-4"], &[]));
        assert_eq!(resolver.snapshot(), None);
        doc.run_frame();
        assert_eq!(resolver.snapshot().unwrap().get("--space-4"), Some("16px"));
    }

    #[test]
    fn identical_requests_are_a_no_op() {
        let (doc, resolver, log) = setup(SHEET);

        resolver.resolve(request(&["--brand"], &[]));
        doc.run_frame();
        resolver.resolve(request(&["--brand"], &[]));

        assert_eq!(doc.pending_frames(), 0);
        assert_eq!(doc.live_observers(), 1);
        assert!(resolver.snapshot().is_some());
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn nested_theme_wrapper_is_observed() {
        let (doc, resolver, _) = setup(SHEET);
        let wrapper = doc.create_element(doc.root(), "div");
        set_theme(&doc, wrapper, Theme::Light);
        let button = doc.create_element(wrapper, "button");
        doc.add_class(button, "btn");

        resolver.resolve(request(&["--brand"], &["background-color"]).with_scope(Some(button)));
        doc.run_frame();
        assert_eq!(brand(&resolver).as_deref(), Some("#6B4E3D"));

        set_theme(&doc, wrapper, Theme::Dark);
        let snapshot = resolver.snapshot().unwrap();
        assert_eq!(snapshot.get("--brand"), Some("#A8D5BA"));
        assert_eq!(snapshot.get("background-color"), Some("#A8D5BA"));

        // still one observer, watching both the wrapper and the root
        assert_eq!(doc.live_observers(), 1);
    }

    #[test]
    fn stylesheet_applied_before_first_frame_is_seen() {
        let (doc, resolver, _) = setup("");

        resolver.resolve(request(&["--brand"], &[]));
        doc.set_stylesheet(StyleSheet::parse(SHEET).unwrap());
        doc.run_frame();

        assert_eq!(brand(&resolver).as_deref(), Some("#6B4E3D"));
    }

    #[test]
    fn immediate_frames_deliver_on_resolve() {
        let doc = Rc::new(Document::with_immediate_frames(
            StyleSheet::parse(SHEET).unwrap(),
        ));
        let resolver = TokenResolver::new(doc.clone(), |_| {});

        resolver.resolve(request(&["--brand"], &[]));
        assert_eq!(brand(&resolver).as_deref(), Some("#6B4E3D"));
        assert_eq!(doc.pending_frames(), 0);
    }

    #[test]
    fn without_a_dom_nothing_happens() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let resolver = TokenResolver::new(Detached::<ElementId>::new(), move |s| {
            sink.borrow_mut().push(s)
        });

        resolver.resolve(request(&["--brand"], &[]));
        assert_eq!(resolver.snapshot(), None);
        resolver.release();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn dropping_the_resolver_releases_everything() {
        let (doc, resolver, log) = setup(SHEET);

        resolver.resolve(request(&["--brand"], &[]));
        drop(resolver);

        assert_eq!(doc.live_observers(), 0);
        assert_eq!(doc.pending_frames(), 0);
        set_theme(&doc, doc.root(), Theme::Dark);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn scenario_disabled_snapshot_is_null() {
        let (doc, resolver, log) = setup(SHEET);

        resolver.resolve(request(&["--brand"], &[]).enabled(false));
        doc.run_frame();

        assert_eq!(resolver.snapshot(), None);
        assert_eq!(doc.live_observers(), 0);
        assert!(log.borrow().is_empty());
    }
}
