//! OpenGL rendering infrastructure, built on `glow`.
//!
//! - [`shader`] -- stage compilation, program linking, location lookup.
//! - [`texture`] -- texture configuration and allocation.
//! - [`target`] -- offscreen framebuffer + color texture.
//! - [`pipeline`] -- the scene and blur passes and the two renderers.

pub mod pipeline;
pub mod shader;
pub mod target;
pub mod texture;

pub use pipeline::{BlurPass, FrameRenderer, ScenePass, SinglePassRenderer, TwoPassRenderer};
pub use shader::{compile_stage, format_shader_log, ShaderProgram};
pub use target::RenderTarget;
pub use texture::{create_texture, TextureConfig};
