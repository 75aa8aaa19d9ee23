use constcat::concat;

mod home;

pub use home::HOME_STYLES;

// the reset, token and component layers live as plain css so that tokenprobe can load the very
// same files the site ships
pub const RESET: &str = include_str!("../../../assets/reset.css");
pub const CSS_VARIABLES: &str = include_str!("../../../assets/tokens.css");
pub const BASE_COMPONENTS: &str = include_str!("../../../assets/components.css");

// site style bundling
pub const SITE_STYLES: &str = concat!(RESET, CSS_VARIABLES, BASE_COMPONENTS, HOME_STYLES);
