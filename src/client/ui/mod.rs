//! Client screens.

mod quiz;
mod render;
mod results;
mod setup;
mod study_guide;

pub use render::render;
