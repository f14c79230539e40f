//! Shader stage compilation and program linking.
//!
//! The program builder takes vertex and fragment source text and yields a
//! linked [`ShaderProgram`], or a typed [`RenderError`] carrying the
//! driver's info log. Attribute and uniform lookups stay non-fatal: a miss
//! logs `warning: <name> invalid` semantics through the `log` facade and
//! returns `None`, and draw calls simply skip the affected uniform.

use crate::error::RenderError;

/// Prefixes each source line with a right-aligned number and a `|`
/// separator, then appends the driver log, so driver messages that cite
/// line numbers can be read against the GLSL they refer to.
pub fn format_shader_log(source: &str, log: &str) -> String {
    let line_count = source.lines().count();
    let width = line_count.to_string().len().max(1);

    let mut out = String::new();
    for (i, line) in source.lines().enumerate() {
        out.push_str(&format!("{:>width$} | {line}\n", i + 1, width = width));
    }

    let log = log.trim_end();
    if !log.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(log);
    }
    out
}

fn stage_name(shader_type: u32) -> &'static str {
    match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

/// Compiles a single shader stage.
///
/// # Errors
///
/// Returns [`RenderError::Compile`] with the numbered source and driver
/// log if the stage fails to compile, or if the driver refuses to create
/// the shader object at all.
#[allow(unsafe_code)]
pub fn compile_stage(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader, RenderError> {
    use glow::HasContext;

    let stage = stage_name(shader_type);

    // SAFETY: glow exposes raw GL entry points as unsafe. shader_type is a
    // valid stage constant and the shader handle is deleted on the error path.
    let shader = unsafe {
        gl.create_shader(shader_type)
            .map_err(|log| RenderError::Compile { stage, log })?
    };

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if gl.get_shader_compile_status(shader) {
            Ok(shader)
        } else {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            Err(RenderError::Compile {
                stage,
                log: format_shader_log(source, &log),
            })
        }
    }
}

/// A linked vertex + fragment program with scoped ownership.
///
/// Created once at startup, bound per pass, and released via
/// [`destroy`](Self::destroy) on the loop's exit path. The stage shader
/// objects are deleted as soon as linking finishes; the program keeps its
/// own copies.
pub struct ShaderProgram {
    program: glow::Program,
}

impl ShaderProgram {
    /// Compiles both stages and links them into a program.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Compile`] if either stage fails, or
    /// [`RenderError::Link`] with the driver log if linking fails. All
    /// intermediate GL objects are deleted on every path.
    #[allow(unsafe_code)]
    pub fn build(
        gl: &glow::Context,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, RenderError> {
        use glow::HasContext;

        let vert = compile_stage(gl, glow::VERTEX_SHADER, vertex_src)?;
        let frag = match compile_stage(gl, glow::FRAGMENT_SHADER, fragment_src) {
            Ok(f) => f,
            Err(e) => {
                // SAFETY: vert is a live shader handle from compile_stage.
                unsafe { gl.delete_shader(vert) };
                return Err(e);
            }
        };

        // SAFETY: all handles below come from successful glow calls against
        // this context; stage objects are deleted once the link finishes.
        let program = match unsafe { gl.create_program() } {
            Ok(p) => p,
            Err(log) => {
                unsafe {
                    gl.delete_shader(vert);
                    gl.delete_shader(frag);
                }
                return Err(RenderError::Link(log));
            }
        };

        let linked = unsafe {
            gl.attach_shader(program, vert);
            gl.attach_shader(program, frag);
            gl.link_program(program);
            gl.detach_shader(program, vert);
            gl.detach_shader(program, frag);
            gl.delete_shader(vert);
            gl.delete_shader(frag);
            gl.get_program_link_status(program)
        };

        if linked {
            Ok(Self { program })
        } else {
            let log = unsafe { gl.get_program_info_log(program) };
            unsafe { gl.delete_program(program) };
            Err(RenderError::Link(log))
        }
    }

    /// The raw program handle, for callers issuing their own GL queries.
    pub fn raw(&self) -> glow::Program {
        self.program
    }

    /// Makes this program current.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: self.program is a valid linked program from build().
        unsafe { gl.use_program(Some(self.program)) };
    }

    /// Looks up a vertex attribute by name.
    ///
    /// A miss is non-fatal: it logs a warning and returns `None`, and draw
    /// calls simply skip the affected location.
    #[allow(unsafe_code)]
    pub fn attrib_location(&self, gl: &glow::Context, name: &str) -> Option<u32> {
        use glow::HasContext;
        // SAFETY: self.program is a valid linked program from build().
        let loc = unsafe { gl.get_attrib_location(self.program, name) };
        if loc.is_none() {
            log::warn!("{name} invalid");
        }
        loc
    }

    /// Looks up a uniform by name. Same non-fatal miss policy as
    /// [`attrib_location`](Self::attrib_location).
    #[allow(unsafe_code)]
    pub fn uniform_location(
        &self,
        gl: &glow::Context,
        name: &str,
    ) -> Option<glow::UniformLocation> {
        use glow::HasContext;
        // SAFETY: self.program is a valid linked program from build().
        let loc = unsafe { gl.get_uniform_location(self.program, name) };
        if loc.is_none() {
            log::warn!("{name} invalid");
        }
        loc
    }

    /// Deletes the program. The GL object model has no destructors, so the
    /// owner calls this on the exit path.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;
        // SAFETY: self.program is a valid program handle from build().
        unsafe { gl.delete_program(self.program) };
    }
}
