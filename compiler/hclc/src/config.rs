//! Compiler configuration.
//!
//! # Environment
//!
//! - `HCLC_SOURCE_EXT`: source file extension (default `hcl`)
//! - `HCLC_TARGET_EXT`: output file extension (default `js`)
//! - `RUST_LOG`: tracing filter, see [`crate::tracing_setup`]

use hcl_codegen::CodegenOptions;

/// Extension pair driving output naming and import validation.
///
/// Extensions are stored without the leading dot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerConfig {
    pub source_extension: String,
    pub target_extension: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            source_extension: "hcl".to_string(),
            target_extension: "js".to_string(),
        }
    }
}

impl CompilerConfig {
    pub const SOURCE_EXT_VAR: &'static str = "HCLC_SOURCE_EXT";
    pub const TARGET_EXT_VAR: &'static str = "HCLC_TARGET_EXT";

    /// Defaults, overridden by any non-empty `HCLC_*` variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`CompilerConfig::from_env`] but reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = CompilerConfig::default();
        if let Some(ext) = lookup(Self::SOURCE_EXT_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_source_extension(ext.trim());
        }
        if let Some(ext) = lookup(Self::TARGET_EXT_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_target_extension(ext.trim());
        }
        config
    }

    #[must_use]
    pub fn with_source_extension(mut self, extension: &str) -> Self {
        self.source_extension = strip_dot(extension);
        self
    }

    #[must_use]
    pub fn with_target_extension(mut self, extension: &str) -> Self {
        self.target_extension = strip_dot(extension);
        self
    }

    /// Options for the code generator, which rewrites import paths with
    /// the same extension pair.
    pub fn codegen_options(&self) -> CodegenOptions {
        CodegenOptions {
            source_extension: self.source_extension.clone(),
            target_extension: self.target_extension.clone(),
        }
    }
}

fn strip_dot(extension: &str) -> String {
    extension.strip_prefix('.').unwrap_or(extension).to_string()
}
