#![deny(unsafe_code)]
//! Core types for the quadblur demo pipelines.
//!
//! Provides the shader [`render::shader::ShaderProgram`] builder, the
//! [`render::target::RenderTarget`] offscreen framebuffer, the two draw
//! passes and renderers in [`render::pipeline`], the pure [`blur::BlurKernel`]
//! math, the fixed [`scene`] configuration constants, and the
//! [`frame::FrameLoop`] state machine that drives a window's redraw cycle.
//!
//! Everything that touches the GPU takes an explicit `&glow::Context`;
//! everything else is pure and testable without one.

pub mod blur;
pub mod error;
pub mod frame;
pub mod render;
pub mod scene;

pub use blur::BlurKernel;
pub use error::RenderError;
pub use frame::{FrameLoop, InputEvent, Key, LoopState};
