use std::rc::Rc;

use dioxus::prelude::*;
use futures::StreamExt;
use tracing::debug;

use tokens::{ResolutionRequest, ResolvedSnapshot, TokenResolver};

use crate::dev::dom::BrowserEnvironment;

// use_resolved_tokens
//
// one resolver per component instance.  the request is rebuilt every render and handed to the
// resolver from an effect, which is a no-op unless something actually changed.  snapshots that
// come out of browser callbacks (animation frames, mutation records) are funnelled through a
// coroutine so that the signal write happens inside the dioxus runtime
//
// with enabled = false the resolver exists but holds nothing, and the returned signal stays None
pub fn use_resolved_tokens(
    token_names: Vec<String>,
    style_properties: Vec<String>,
    scope: Signal<Option<web_sys::Element>>,
    enabled: bool,
) -> Signal<Option<ResolvedSnapshot>> {
    let mut snapshot = use_signal(|| None::<ResolvedSnapshot>);

    let updates = use_coroutine(move |mut rx: UnboundedReceiver<Option<ResolvedSnapshot>>| async move {
        while let Some(next) = rx.next().await {
            snapshot.set(next);
        }
    });

    let resolver = use_hook(move || {
        let tx = updates.tx();
        Rc::new(TokenResolver::new(BrowserEnvironment::new(), move |next| {
            if tx.unbounded_send(next).is_err() {
                debug!("token snapshot dropped, component is gone");
            }
        }))
    });

    let active = resolver.clone();
    use_effect(use_reactive(
        (&token_names, &style_properties, &enabled),
        move |(token_names, style_properties, enabled)| {
            // reading the scope here re-runs the effect once the element mounts
            let request = ResolutionRequest {
                token_names,
                style_properties,
                scope: scope(),
                enabled,
            };
            active.resolve(request);
        },
    ));

    use_drop(move || resolver.release());

    snapshot
}

// the mount handler for a primitive's root element
//
// dioxus hands back the underlying web_sys::Element on the web renderer; anything else leaves
// the scope empty and the resolver falls back to the document root
pub fn capture_scope(mut scope: Signal<Option<web_sys::Element>>, evt: MountedEvent) {
    scope.set(evt.data().downcast::<web_sys::Element>().cloned());
}
