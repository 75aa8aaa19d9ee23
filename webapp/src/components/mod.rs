// token-driven primitives
//
// every primitive takes a debug flag that puts a DebugPanel in front of its content, showing
// its classes and the live values of the tokens it paints with
pub mod button;
pub mod card;
pub mod heading;
pub mod input;
pub mod navigation;
pub mod section;
pub mod tokens;

pub use button::Button;
pub use card::Card;
pub use heading::{Heading, Text};
pub use input::Input;
pub use section::Section;
