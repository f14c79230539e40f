//! Error types for GPU resource construction.
//!
//! Every builder returns a typed error and the caller decides whether to
//! abort. The one warn-and-continue path is attribute/uniform location
//! lookup, which logs and yields `None`.

use thiserror::Error;

/// Errors produced while building GPU resources.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// A shader stage failed to compile. `log` carries the driver's info
    /// log prefixed with the line-numbered source.
    #[error("shader compile error ({stage}):\n{log}")]
    Compile {
        /// The stage that failed ("vertex" or "fragment").
        stage: &'static str,
        /// Numbered source plus the driver's info log.
        log: String,
    },

    /// A program failed to link.
    #[error("program link error:\n{0}")]
    Link(String),

    /// The driver refused to allocate an object (texture, buffer,
    /// vertex array, or framebuffer).
    #[error("GL allocation failed: {0}")]
    Allocation(String),

    /// A framebuffer was not complete after attaching its color texture.
    #[error("framebuffer incomplete: status 0x{status:04X}")]
    FramebufferIncomplete {
        /// The raw `glCheckFramebufferStatus` value.
        status: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_display_names_stage_and_log() {
        let err = RenderError::Compile {
            stage: "fragment",
            log: "0:3: undeclared identifier".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("fragment"), "missing stage in: {msg}");
        assert!(
            msg.contains("undeclared identifier"),
            "missing driver log in: {msg}"
        );
    }

    #[test]
    fn link_error_display_includes_log() {
        let err = RenderError::Link("attached shaders mismatch".into());
        let msg = format!("{err}");
        assert!(msg.contains("attached shaders mismatch"), "got: {msg}");
    }

    #[test]
    fn allocation_error_display_includes_reason() {
        let err = RenderError::Allocation("out of handles".into());
        assert!(format!("{err}").contains("out of handles"));
    }

    #[test]
    fn framebuffer_incomplete_formats_status_as_hex() {
        // 0x8CD6 is GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT.
        let err = RenderError::FramebufferIncomplete { status: 0x8CD6 };
        let msg = format!("{err}");
        assert!(msg.contains("0x8CD6"), "expected hex status in: {msg}");
    }

    #[test]
    fn render_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RenderError>();
    }

    #[test]
    fn render_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<RenderError>();
    }
}
