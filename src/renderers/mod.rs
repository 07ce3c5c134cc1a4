//! Concrete [Renderer](crate::render::Renderer) implementations.

mod ascii_renderer;

pub use ascii_renderer::AsciiRenderer;
