//! Fixed scene data for the quadblur demos.
//!
//! Everything the demos draw is a process-wide constant: the window size,
//! the two overlapping quads and their colors, the fullscreen quad that
//! samples the offscreen texture, the clear colors, and the GLSL sources
//! for the scene pass. None of it is configurable at runtime.

/// Window (and offscreen texture) width in pixels.
pub const WINDOW_WIDTH: u32 = 512;

/// Window (and offscreen texture) height in pixels.
pub const WINDOW_HEIGHT: u32 = 512;

/// Box-blur neighborhood radius in texels for the post-process pass.
pub const BLUR_RADIUS: u32 = 4;

/// Clip-space positions of the red quad, four `(x, y)` pairs in fan order.
pub const RED_QUAD: [f32; 8] = [
    -0.5, -0.5, //
    0.25, -0.5, //
    0.25, 0.25, //
    -0.5, 0.25,
];

/// Clip-space positions of the blue quad, overlapping the red one.
pub const BLUE_QUAD: [f32; 8] = [
    -0.25, -0.25, //
    0.5, -0.25, //
    0.5, 0.5, //
    -0.25, 0.5,
];

/// Opaque red, the first quad's fill color.
pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Opaque blue, the second quad's fill color.
pub const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// Clear color for the offscreen scene pass (opaque green).
pub const OFFSCREEN_CLEAR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// Clear color for the on-screen pass (opaque black). Also used by the
/// single-pass variant, which draws straight into the default framebuffer.
pub const FINAL_CLEAR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// The fullscreen quad sampled by the blur pass, four interleaved
/// `(x, y, u, v)` vertices in fan order. The quad is inset to 0.9 so the
/// window border shows the clear color around the blurred scene.
pub const SCREEN_QUAD: [f32; 16] = [
    -0.9, -0.9, 0.0, 0.0, //
    0.9, -0.9, 1.0, 0.0, //
    0.9, 0.9, 1.0, 1.0, //
    -0.9, 0.9, 0.0, 1.0,
];

/// Vertex stage for the scene pass: clip-space positions pass through.
pub const SCENE_VERTEX_SHADER: &str = r#"#version 330 core
in vec2 position;
void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
"#;

/// Fragment stage for the scene pass: flat fill with the `color` uniform.
pub const SCENE_FRAGMENT_SHADER: &str = r#"#version 330 core
uniform vec4 color;
out vec4 out_color;
void main() {
    out_color = color;
}
"#;

/// Vertex stage for the blur pass: positions pass through, texture
/// coordinates are forwarded to the fragment stage.
pub const BLUR_VERTEX_SHADER: &str = r#"#version 330 core
in vec2 position;
in vec2 texture_position;
out vec2 v_uv;
void main() {
    gl_Position = vec4(position, 0.0, 1.0);
    v_uv = texture_position;
}
"#;
