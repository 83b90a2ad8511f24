//! Interactive re-parameterization module
//!
//! Range sliders, the input sources that drive them, and a session that keeps
//! a rendered view in sync with the sliders.

mod input;
mod session;
mod slider;

#[cfg(test)]
mod tests;

pub use input::{InputEvent, InputSource, LineInputSource};
pub use session::{InteractiveSession, SessionSummary};
pub use slider::Slider;
