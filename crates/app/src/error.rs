//! Structured app errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success (including quit-on-escape)
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: render error (shader compile/link, GL allocation, incomplete FBO)
//! - 11: window/context error (event loop, GL display, surface, present)

use quadblur_core::RenderError;
use std::fmt;

/// Errors produced by the windowed binary, each mapped to an exit code.
#[derive(Debug)]
pub enum AppError {
    /// A GPU resource failed to build.
    Render(RenderError),
    /// The windowing or GL-context layer failed.
    Window(String),
}

impl AppError {
    /// The process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Render(_) => 10,
            AppError::Window(_) => 11,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Render(e) => write!(f, "{e}"),
            AppError::Window(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Render(e)
    }
}
