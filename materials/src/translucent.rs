//! Translucent Material

use super::*;
use core::material::*;

/// A material with subsurface transport described by a Gaussian profile.
pub struct TranslucentMaterial {
    /// Material name.
    name: String,

    /// The diffusion profile.
    bssrdf: GaussianBSSRDF,

    /// Inputs of the diffusion profile.
    inputs: GaussianBSSRDFInputs,

    /// Optional bump shader.
    bump: Option<Box<dyn BumpShader>>,
}

impl TranslucentMaterial {
    /// Create a new `TranslucentMaterial`.
    ///
    /// * `name`   - Material name.
    /// * `inputs` - Inputs of the diffusion profile.
    pub fn new(name: &str, inputs: GaussianBSSRDFInputs) -> Self {
        debug!(
            "Creating translucent material '{name}' with variance {}",
            inputs.variance()
        );
        Self {
            name: name.to_string(),
            bssrdf: GaussianBSSRDF,
            inputs,
            bump: None,
        }
    }

    /// Attaches a bump shader to the material.
    ///
    /// * `bump` - The shader.
    pub fn with_bump(mut self, bump: Box<dyn BumpShader>) -> Self {
        self.bump = Some(bump);
        self
    }

    /// Returns the diffusion profile.
    pub fn bssrdf(&self) -> &GaussianBSSRDF {
        &self.bssrdf
    }

    /// Returns the inputs of the diffusion profile.
    pub fn inputs(&self) -> &GaussianBSSRDFInputs {
        &self.inputs
    }
}

impl Material for TranslucentMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn bump_shader(&self) -> Option<&dyn BumpShader> {
        self.bump.as_deref()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
