//! Reusable form widgets
//!
//! Text input, option select and bounded slider; each carries its own label,
//! focus flag and inline validation error.

pub mod input;
pub mod select;
pub mod slider;

pub use input::TextInput;
pub use select::SelectInput;
pub use slider::SliderInput;
