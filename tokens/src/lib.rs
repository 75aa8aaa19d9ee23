pub mod document;
pub mod env;
pub mod request;
pub mod resolver;
pub mod snapshot;
pub mod stylesheet;
pub mod theme;

#[cfg(feature = "config")]
pub mod config;

pub use env::StyleEnvironment;
pub use request::ResolutionRequest;
pub use resolver::{TokenResolver, read_snapshot};
pub use snapshot::ResolvedSnapshot;
pub use theme::{THEME_ATTRIBUTE, Theme};

// sentinel for names that have no computed value
//
// this mirrors what the browser does for unknown custom properties (an empty string), but
// makes the empty case legible in the debug panel
pub const UNSET: &str = "(unset)";
