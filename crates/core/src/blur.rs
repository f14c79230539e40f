//! Box-blur kernel policy and GLSL generation.
//!
//! [`BlurKernel`] is a pure mirror of the post-process fragment shader, so
//! the normalization can be unit tested without a GPU. The shader divides
//! the summed neighborhood by `(2r - 1)^2` even though it samples
//! `(2r + 1)^2` taps; that under-normalization brightens the output by a
//! factor of 81/49 at the default radius of 4. The divisor is a deliberate,
//! pinned policy (see DESIGN.md), and the tests assert the 81/49 gain
//! explicitly rather than a corrected one.

/// A square box-blur kernel of a given texel radius.
///
/// `fragment_source` bakes the radius and divisor into the generated GLSL;
/// the arithmetic methods describe what that shader computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurKernel {
    radius: u32,
}

impl BlurKernel {
    /// Creates a kernel with the given neighborhood radius in texels.
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    /// The neighborhood radius in texels.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of texels actually sampled: `(2r + 1)^2`.
    pub fn tap_count(&self) -> u32 {
        let side = 2 * self.radius + 1;
        side * side
    }

    /// The normalization divisor the shader uses: `(2r - 1)^2`.
    ///
    /// Deliberately not equal to [`tap_count`](Self::tap_count); see the
    /// module docs for why.
    pub fn divisor(&self) -> u32 {
        let side = 2 * i64::from(self.radius) - 1;
        (side * side) as u32
    }

    /// Brightness gain applied to a uniform-color input: taps / divisor.
    pub fn gain(&self) -> f32 {
        self.tap_count() as f32 / self.divisor() as f32
    }

    /// The color the shader produces at an interior texel when the whole
    /// input texture holds the uniform color `rgb`.
    pub fn response_to_uniform(&self, rgb: [f32; 3]) -> [f32; 3] {
        let g = self.gain();
        [rgb[0] * g, rgb[1] * g, rgb[2] * g]
    }

    /// Generates the post-process fragment shader for this kernel.
    ///
    /// Sums the `render_texture` color over the square neighborhood, with
    /// per-axis texel size taken from `textureSize`, then divides by
    /// [`divisor`](Self::divisor). Output alpha is forced to 1.0.
    pub fn fragment_source(&self) -> String {
        format!(
            r#"#version 330 core
in vec2 v_uv;
out vec4 out_color;
uniform sampler2D render_texture;
void main() {{
    vec2 texel = 1.0 / vec2(textureSize(render_texture, 0));
    vec3 sum = vec3(0.0);
    for (int i = -{r}; i <= {r}; i++) {{
        for (int j = -{r}; j <= {r}; j++) {{
            sum += texture(render_texture, v_uv + vec2(i, j) * texel).rgb;
        }}
    }}
    out_color = vec4(sum / {div}.0, 1.0);
}}
"#,
            r = self.radius,
            div = self.divisor(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::BLUR_RADIUS;

    #[test]
    fn default_radius_samples_81_taps() {
        let kernel = BlurKernel::new(BLUR_RADIUS);
        assert_eq!(kernel.tap_count(), 81, "9x9 neighborhood at radius 4");
    }

    #[test]
    fn default_radius_divides_by_49() {
        let kernel = BlurKernel::new(BLUR_RADIUS);
        assert_eq!(kernel.divisor(), 49, "preserved (2r - 1)^2 divisor");
    }

    #[test]
    fn uniform_input_gains_81_over_49() {
        // Testable property: a uniform-color texture comes out multiplied
        // by 81/49 at interior texels. This is the pinned policy, not a bug
        // to be fixed silently.
        let kernel = BlurKernel::new(4);
        let expected = 81.0 / 49.0;
        assert!((kernel.gain() - expected).abs() < 1e-6, "gain = {}", kernel.gain());

        let out = kernel.response_to_uniform([0.25, 0.5, 1.0]);
        assert!((out[0] - 0.25 * expected).abs() < 1e-6);
        assert!((out[1] - 0.5 * expected).abs() < 1e-6);
        assert!((out[2] - 1.0 * expected).abs() < 1e-6);
    }

    #[test]
    fn radius_zero_is_identity() {
        let kernel = BlurKernel::new(0);
        assert_eq!(kernel.tap_count(), 1);
        assert_eq!(kernel.divisor(), 1);
        assert_eq!(kernel.response_to_uniform([0.3, 0.6, 0.9]), [0.3, 0.6, 0.9]);
    }

    #[test]
    fn fragment_source_bakes_radius_and_divisor() {
        let src = BlurKernel::new(4).fragment_source();
        assert!(src.contains("#version 330 core"), "missing version in:\n{src}");
        assert!(src.contains("-4; i <= 4"), "missing radius loop bounds in:\n{src}");
        assert!(src.contains("/ 49.0"), "missing divisor in:\n{src}");
        assert!(src.contains("uniform sampler2D render_texture"));
        assert!(src.contains("textureSize"), "texel size must come from the texture");
    }

    #[test]
    fn fragment_source_forces_opaque_alpha() {
        let src = BlurKernel::new(2).fragment_source();
        assert!(src.contains(", 1.0)"), "alpha should be forced to 1.0 in:\n{src}");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn gain_matches_the_side_length_ratio(radius in 1u32..=32) {
                let kernel = BlurKernel::new(radius);
                let taps = (2 * radius + 1).pow(2);
                let divisor = (2 * radius - 1).pow(2);
                let expected = taps as f32 / divisor as f32;
                prop_assert!(
                    (kernel.gain() - expected).abs() < 1e-5,
                    "gain {} != {taps}/{divisor}",
                    kernel.gain()
                );
            }

            #[test]
            fn gain_brightens_for_any_positive_radius(radius in 1u32..=32) {
                let kernel = BlurKernel::new(radius);
                prop_assert!(
                    kernel.gain() > 1.0,
                    "divisor {} must undershoot taps {}",
                    kernel.divisor(),
                    kernel.tap_count()
                );
            }

            #[test]
            fn response_scales_every_channel(radius in 1u32..=16, r in 0f32..1.0, g in 0f32..1.0, b in 0f32..1.0) {
                let kernel = BlurKernel::new(radius);
                let out = kernel.response_to_uniform([r, g, b]);
                let gain = kernel.gain();
                prop_assert!((out[0] - r * gain).abs() < 1e-5);
                prop_assert!((out[1] - g * gain).abs() < 1e-5);
                prop_assert!((out[2] - b * gain).abs() < 1e-5);
            }
        }
    }
}
