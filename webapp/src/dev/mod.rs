// runtime token inspection
//
// any component can opt into a debug overlay showing its class list and the live values of
// the tokens and computed properties it depends on.  the resolution engine lives in the
// tokens crate; this is the browser binding and the overlay itself
pub mod dom;
pub mod hooks;
pub mod panel;

pub use hooks::use_resolved_tokens;
pub use panel::DebugPanel;
