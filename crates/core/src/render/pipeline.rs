//! The draw passes and the two demo renderers.
//!
//! [`ScenePass`] draws the red and blue quads; [`BlurPass`] draws one
//! fullscreen quad that box-blurs the offscreen texture.
//! [`TwoPassRenderer`] chains them through a [`RenderTarget`];
//! [`SinglePassRenderer`] is the strict subset that draws the scene pass
//! straight into the default framebuffer.
//!
//! Client-side vertex arrays and `GL_QUADS` do not exist in the core
//! profile, so each quad lives in a static VBO and is drawn as a
//! four-vertex `TRIANGLE_FAN`.

use crate::blur::BlurKernel;
use crate::error::RenderError;
use crate::scene;

use super::shader::ShaderProgram;
use super::target::RenderTarget;

/// One frame's worth of drawing against a current GL context.
///
/// Object-safe so the windowed binary can hold either variant as
/// `Box<dyn FrameRenderer>`. Present/swap stays with the caller; `render`
/// ends at `glFlush`.
pub trait FrameRenderer {
    /// Draws one frame.
    fn render(&mut self, gl: &glow::Context);

    /// Releases every GL object this renderer owns. Called on the loop's
    /// exit path; the renderer must not be used afterwards.
    fn destroy(&self, gl: &glow::Context);
}

/// Pass 1: clears, then fills the red and the blue quad.
///
/// Both quads share one VBO (red in vertices 0..4, blue in 4..8) and one
/// program whose `color` uniform is set per quad.
pub struct ScenePass {
    program: ShaderProgram,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    color: Option<glow::UniformLocation>,
}

impl ScenePass {
    /// Compiles the scene program and uploads both quads.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the program fails to build or the
    /// vertex objects cannot be allocated.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context) -> Result<Self, RenderError> {
        use glow::HasContext;

        let program = ShaderProgram::build(
            gl,
            scene::SCENE_VERTEX_SHADER,
            scene::SCENE_FRAGMENT_SHADER,
        )?;
        let position = program.attrib_location(gl, "position").unwrap_or(0);
        let color = program.uniform_location(gl, "color");

        let mut vertices = [0.0f32; 16];
        vertices[..8].copy_from_slice(&scene::RED_QUAD);
        vertices[8..].copy_from_slice(&scene::BLUE_QUAD);

        // SAFETY: glow exposes raw GL entry points as unsafe. The buffer
        // layout matches the attribute pointer (tightly packed vec2), and
        // the VAO captures the binding before everything is unbound. The
        // program (and a created VAO) are released again on failure.
        let (vao, vbo) = unsafe {
            let vao = match gl.create_vertex_array() {
                Ok(v) => v,
                Err(log) => {
                    program.destroy(gl);
                    return Err(RenderError::Allocation(log));
                }
            };
            let vbo = match gl.create_buffer() {
                Ok(b) => b,
                Err(log) => {
                    gl.delete_vertex_array(vao);
                    program.destroy(gl);
                    return Err(RenderError::Allocation(log));
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&vertices),
                glow::STATIC_DRAW,
            );
            gl.enable_vertex_attrib_array(position);
            gl.vertex_attrib_pointer_f32(position, 2, glow::FLOAT, false, 0, 0);
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            (vao, vbo)
        };

        Ok(Self {
            program,
            vao,
            vbo,
            color,
        })
    }

    /// Clears the current draw target to `clear` and draws both quads.
    #[allow(unsafe_code)]
    pub fn draw(&self, gl: &glow::Context, clear: [f32; 4]) {
        use glow::HasContext;

        // SAFETY: all handles were created in new() against this context.
        // A None uniform location makes the color calls no-ops; lookup
        // misses warned at build time and drawing continues regardless.
        unsafe {
            gl.clear_color(clear[0], clear[1], clear[2], clear[3]);
            gl.clear(glow::COLOR_BUFFER_BIT);

            self.program.bind(gl);
            gl.bind_vertex_array(Some(self.vao));

            let [r, g, b, a] = scene::RED;
            gl.uniform_4_f32(self.color.as_ref(), r, g, b, a);
            gl.draw_arrays(glow::TRIANGLE_FAN, 0, 4);

            let [r, g, b, a] = scene::BLUE;
            gl.uniform_4_f32(self.color.as_ref(), r, g, b, a);
            gl.draw_arrays(glow::TRIANGLE_FAN, 4, 4);

            gl.bind_vertex_array(None);
        }
    }

    /// Releases the program and vertex objects.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: handles are valid objects created in new().
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
        }
        self.program.destroy(gl);
    }
}

/// Pass 2: box-blurs an input texture onto one fullscreen quad.
pub struct BlurPass {
    program: ShaderProgram,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    sampler: Option<glow::UniformLocation>,
}

impl BlurPass {
    /// Compiles the blur program for `kernel` and uploads the fullscreen
    /// quad (interleaved position + texture coordinate).
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the program fails to build or the
    /// vertex objects cannot be allocated.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context, kernel: BlurKernel) -> Result<Self, RenderError> {
        use glow::HasContext;

        let program =
            ShaderProgram::build(gl, scene::BLUR_VERTEX_SHADER, &kernel.fragment_source())?;
        let position = program.attrib_location(gl, "position").unwrap_or(0);
        let texture_position = program.attrib_location(gl, "texture_position").unwrap_or(1);
        let sampler = program.uniform_location(gl, "render_texture");

        const STRIDE: i32 = 4 * 4; // (x, y, u, v) as f32

        // SAFETY: glow exposes raw GL entry points as unsafe. Attribute
        // offsets match the interleaved layout of scene::SCREEN_QUAD. The
        // program (and a created VAO) are released again on failure.
        let (vao, vbo) = unsafe {
            let vao = match gl.create_vertex_array() {
                Ok(v) => v,
                Err(log) => {
                    program.destroy(gl);
                    return Err(RenderError::Allocation(log));
                }
            };
            let vbo = match gl.create_buffer() {
                Ok(b) => b,
                Err(log) => {
                    gl.delete_vertex_array(vao);
                    program.destroy(gl);
                    return Err(RenderError::Allocation(log));
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&scene::SCREEN_QUAD),
                glow::STATIC_DRAW,
            );
            gl.enable_vertex_attrib_array(position);
            gl.vertex_attrib_pointer_f32(position, 2, glow::FLOAT, false, STRIDE, 0);
            gl.enable_vertex_attrib_array(texture_position);
            gl.vertex_attrib_pointer_f32(texture_position, 2, glow::FLOAT, false, STRIDE, 8);
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            (vao, vbo)
        };

        Ok(Self {
            program,
            vao,
            vbo,
            sampler,
        })
    }

    /// Clears to black, binds `texture` to unit 0, and draws the blurred
    /// fullscreen quad into the current draw target.
    #[allow(unsafe_code)]
    pub fn draw(&self, gl: &glow::Context, texture: glow::Texture) {
        use glow::HasContext;

        // SAFETY: all handles were created against this context; texture
        // is the offscreen target's live color attachment.
        unsafe {
            let [r, g, b, a] = scene::FINAL_CLEAR;
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT);

            self.program.bind(gl);

            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.uniform_1_i32(self.sampler.as_ref(), 0);

            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::TRIANGLE_FAN, 0, 4);
            gl.bind_vertex_array(None);
        }
    }

    /// Releases the program and vertex objects.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: handles are valid objects created in new().
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
        }
        self.program.destroy(gl);
    }
}

/// The two-pass demo: scene into the offscreen target, blur onto the window.
pub struct TwoPassRenderer {
    scene_pass: ScenePass,
    blur_pass: BlurPass,
    target: RenderTarget,
    width: u32,
    height: u32,
}

impl TwoPassRenderer {
    /// Builds both passes and the offscreen target at the window size.
    ///
    /// # Errors
    ///
    /// Returns the first [`RenderError`] from program compilation, vertex
    /// allocation, or target construction; anything built before the
    /// failure is released again.
    pub fn new(gl: &glow::Context, width: u32, height: u32) -> Result<Self, RenderError> {
        let scene_pass = ScenePass::new(gl)?;

        let blur_pass = match BlurPass::new(gl, BlurKernel::new(scene::BLUR_RADIUS)) {
            Ok(p) => p,
            Err(e) => {
                scene_pass.destroy(gl);
                return Err(e);
            }
        };

        let target = match RenderTarget::new(gl, width, height) {
            Ok(t) => t,
            Err(e) => {
                blur_pass.destroy(gl);
                scene_pass.destroy(gl);
                return Err(e);
            }
        };

        Ok(Self {
            scene_pass,
            blur_pass,
            target,
            width,
            height,
        })
    }
}

impl FrameRenderer for TwoPassRenderer {
    #[allow(unsafe_code)]
    fn render(&mut self, gl: &glow::Context) {
        use glow::HasContext;

        self.target.bind(gl);
        // SAFETY: COLOR_ATTACHMENT0 is the target's sole color output.
        unsafe { gl.draw_buffers(&[glow::COLOR_ATTACHMENT0]) };
        self.scene_pass.draw(gl, scene::OFFSCREEN_CLEAR);

        RenderTarget::bind_default(gl, self.width, self.height);
        self.blur_pass.draw(gl, self.target.texture());

        // SAFETY: flush takes no handles.
        unsafe { gl.flush() };
    }

    fn destroy(&self, gl: &glow::Context) {
        self.blur_pass.destroy(gl);
        self.scene_pass.destroy(gl);
        self.target.destroy(gl);
    }
}

/// The single-pass demo: the scene pass drawn straight at the window.
pub struct SinglePassRenderer {
    scene_pass: ScenePass,
    width: u32,
    height: u32,
}

impl SinglePassRenderer {
    /// Builds the scene pass for a window of the given size.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the scene pass cannot be built.
    pub fn new(gl: &glow::Context, width: u32, height: u32) -> Result<Self, RenderError> {
        Ok(Self {
            scene_pass: ScenePass::new(gl)?,
            width,
            height,
        })
    }
}

impl FrameRenderer for SinglePassRenderer {
    #[allow(unsafe_code)]
    fn render(&mut self, gl: &glow::Context) {
        use glow::HasContext;

        RenderTarget::bind_default(gl, self.width, self.height);
        self.scene_pass.draw(gl, scene::FINAL_CLEAR);

        // SAFETY: flush takes no handles.
        unsafe { gl.flush() };
    }

    fn destroy(&self, gl: &glow::Context) {
        self.scene_pass.destroy(gl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderers_are_object_safe() {
        // The windowed binary holds a Box<dyn FrameRenderer>; this fails to
        // compile if the trait loses object safety.
        fn _take(_: Box<dyn FrameRenderer>) {}
        fn _single(r: SinglePassRenderer) -> Box<dyn FrameRenderer> {
            Box::new(r)
        }
        fn _two(r: TwoPassRenderer) -> Box<dyn FrameRenderer> {
            Box::new(r)
        }
    }

    #[test]
    #[ignore = "requires GL context"]
    fn two_pass_frame_blurs_the_offscreen_scene() {
        // Would test: render() once, read back the default framebuffer, and
        // check interior pixels of the green background read as
        // OFFSCREEN_CLEAR * 81/49 (clamped by the display format).
    }

    #[test]
    #[ignore = "requires GL context"]
    fn single_pass_frame_draws_both_quads() {
        // Would test: render() once and sample one pixel inside each quad
        // for RED and BLUE respectively.
    }
}
