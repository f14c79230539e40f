//! Texture allocation for the offscreen target.

use crate::error::RenderError;

/// Parameters for a 2D GPU texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureConfig {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// GL internal format (e.g. `glow::RGBA16F`).
    pub internal_format: u32,
    /// Min/mag filter (e.g. `glow::LINEAR`).
    pub filter: u32,
}

impl TextureConfig {
    /// Floating-point RGBA with linear filtering, the format the offscreen
    /// target renders into and the blur pass samples from.
    pub fn rgba16f(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            internal_format: glow::RGBA16F,
            filter: glow::LINEAR,
        }
    }

    /// The pixel transfer type matching [`internal_format`](Self::internal_format).
    pub fn pixel_type(&self) -> u32 {
        match self.internal_format {
            glow::RGBA16F | glow::RGB16F => glow::HALF_FLOAT,
            glow::RGBA32F | glow::RGB32F => glow::FLOAT,
            _ => glow::UNSIGNED_BYTE,
        }
    }
}

/// Allocates a 2D texture: storage at the configured size with no initial
/// data, the configured filter for both min and mag, and clamp-to-edge
/// addressing on both axes.
///
/// # Errors
///
/// Returns [`RenderError::Allocation`] if the driver cannot create the
/// texture object.
#[allow(unsafe_code)]
pub fn create_texture(
    gl: &glow::Context,
    config: &TextureConfig,
) -> Result<glow::Texture, RenderError> {
    use glow::HasContext;

    // SAFETY: glow exposes raw GL entry points as unsafe. All parameters
    // are valid GL constants taken from TextureConfig, and the texture is
    // unbound again before returning.
    let texture = unsafe { gl.create_texture().map_err(RenderError::Allocation)? };

    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));

        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            config.filter as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            config.filter as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_S,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_T,
            glow::CLAMP_TO_EDGE as i32,
        );

        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            config.internal_format as i32,
            config.width as i32,
            config.height as i32,
            0,
            glow::RGBA,
            config.pixel_type(),
            glow::PixelUnpackData::Slice(None),
        );

        gl.bind_texture(glow::TEXTURE_2D, None);
    }

    Ok(texture)
}
