use std::rc::Rc;

use js_sys::Array;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Element, MutationObserver, MutationObserverInit};

use tokens::{StyleEnvironment, THEME_ATTRIBUTE};

// BrowserEnvironment
//
// the live DOM: getComputedStyle for reads, requestAnimationFrame for the deferred first read,
// and a MutationObserver for attribute changes.  everything degrades to "no value"/"no handle"
// when there is no window, which is the case while rendering outside the browser
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserEnvironment;

// the closure has to stay alive until the frame fires or is cancelled
pub struct FrameRequest {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

pub struct AttributeObserver {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(Array, MutationObserver)>,
}

impl BrowserEnvironment {
    pub fn new() -> Self {
        BrowserEnvironment
    }
}

impl StyleEnvironment for BrowserEnvironment {
    type Element = Element;
    type Frame = FrameRequest;
    type Observer = AttributeObserver;

    fn document_root(&self) -> Option<Element> {
        web_sys::window()?.document()?.document_element()
    }

    fn themed_ancestor(&self, scope: &Element) -> Option<Element> {
        match scope.closest(&format!("[{THEME_ATTRIBUTE}]")) {
            Ok(el) => el,
            Err(err) => {
                warn!(?err, "failed to look up themed ancestor");
                None
            }
        }
    }

    fn read_property(&self, scope: &Element, name: &str) -> String {
        let Some(window) = web_sys::window() else {
            return String::new();
        };

        match window.get_computed_style(scope) {
            Ok(Some(style)) => style.get_property_value(name).unwrap_or_default(),
            Ok(None) => String::new(),
            Err(err) => {
                warn!(?err, name, "failed to read computed style");
                String::new()
            }
        }
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Option<FrameRequest> {
        let window = web_sys::window()?;
        let closure: Closure<dyn FnMut()> = Closure::once(callback);

        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => Some(FrameRequest {
                id,
                _callback: closure,
            }),
            Err(err) => {
                warn!(?err, "failed to request animation frame");
                None
            }
        }
    }

    fn cancel_frame(&self, frame: FrameRequest) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.cancel_animation_frame(frame.id) {
                warn!(?err, "failed to cancel animation frame");
            }
        }
    }

    fn observe_attributes(
        &self,
        targets: &[Element],
        filter: &[&str],
        callback: Rc<dyn Fn()>,
    ) -> Option<AttributeObserver> {
        let closure = Closure::<dyn FnMut(Array, MutationObserver)>::new(
            move |_records: Array, _observer: MutationObserver| callback(),
        );

        let observer = match MutationObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(err) => {
                warn!(?err, "failed to create mutation observer");
                return None;
            }
        };

        let init = MutationObserverInit::new();
        init.set_attributes(true);
        init.set_attribute_filter(&filter.iter().map(|f| JsValue::from_str(f)).collect::<Array>());

        for target in targets {
            if let Err(err) = observer.observe_with_options(target, &init) {
                warn!(?err, "failed to observe element");
            }
        }

        Some(AttributeObserver {
            observer,
            _callback: closure,
        })
    }

    fn disconnect(&self, observer: AttributeObserver) {
        observer.observer.disconnect();
    }
}
