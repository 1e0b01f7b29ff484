use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::AtelierError;

/// Garment pass source.
pub const GARMENT_SHADER: &str = include_str!("../../assets/shaders/garment.wgsl");

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Shared WGSL modules are registered once at construction. Consuming
/// shaders use `#import atelier::module_name` to pull them in. Output is
/// `naga::Module` IR, so wgpu skips re-parsing WGSL.
pub struct ShaderComposer {
    composer: Composer,
}

/// Shared module definition.
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Registered in dependency order.
const MODULES: &[ModuleDef] = &[
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/camera.wgsl"),
        file_path: "modules/camera.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/lighting.wgsl"),
        file_path: "modules/lighting.wgsl",
    },
];

impl ShaderComposer {
    /// Composer with the `atelier::camera` and `atelier::lighting`
    /// modules registered.
    ///
    /// # Errors
    ///
    /// Returns [`AtelierError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, AtelierError> {
        let mut composer = Composer::default();
        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    AtelierError::Shader(format!(
                        "failed to register '{}': {e:?}",
                        m.file_path
                    ))
                })?;
        }
        Ok(Self { composer })
    }

    /// Compose `source` into a `wgpu::ShaderModule` ready for pipeline
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`AtelierError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, AtelierError> {
        let module = self.compose_naga(source, file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
        }))
    }

    /// Compose into naga IR without a device.
    ///
    /// # Errors
    ///
    /// Returns [`AtelierError::Shader`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, AtelierError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                AtelierError::Shader(format!("failed to compose '{file_path}': {e}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garment_shader_composes_and_validates() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer
            .compose_naga(GARMENT_SHADER, "garment.wgsl")
            .unwrap_or_else(|e| panic!("{e}"));
        let entry_points: Vec<_> =
            module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(entry_points.contains(&"vs_main"));
        assert!(entry_points.contains(&"fs_main"));

        let _ = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .unwrap();
    }

    #[test]
    fn unresolved_import_item_is_a_shader_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let source = "#import atelier::missing\nfn f() -> f32 { return missing::x; }\n";
        let err = composer.compose_naga(source, "broken.wgsl").unwrap_err();
        assert!(matches!(err, AtelierError::Shader(_)));
    }
}
