//! The generator boundary: source text in, dialect text out.

use schemagen_core::Target;
use tracing::debug;

use crate::{
    GeneratorError,
    dialects::{Effect, JsonSchema, SchemaDialect, TypeBox, Valibot, Yup, Zod},
    model::Model,
};

/// Trait for turning TypeScript declarations into a target dialect.
///
/// Implement this trait to plug in a different code generator.
pub trait SchemaGenerator {
    /// The target this generator produces.
    fn target(&self) -> Target;

    /// Generate dialect code for `source`. `file_name` is used for
    /// diagnostics only.
    fn generate(&self, source: &str, file_name: &str) -> Result<String, GeneratorError>;
}

/// Generates through the intermediate [`Model`] and a [`SchemaDialect`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelGenerator<D>(pub D);

impl<D: SchemaDialect> SchemaGenerator for ModelGenerator<D> {
    fn target(&self) -> Target {
        self.0.target()
    }

    fn generate(&self, source: &str, file_name: &str) -> Result<String, GeneratorError> {
        let model = Model::from_source(source, file_name)?;
        debug!(
            dialect = %self.0.target(),
            declarations = model.declarations.len(),
            "emitting model"
        );
        Ok(self.0.emit(&model))
    }
}

/// Returns the (flattened) TypeScript unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl SchemaGenerator for Passthrough {
    fn target(&self) -> Target {
        Target::Types
    }

    fn generate(&self, source: &str, _file_name: &str) -> Result<String, GeneratorError> {
        Ok(source.to_string())
    }
}

/// The built-in generator for `target`.
pub fn generator_for(target: Target) -> Box<dyn SchemaGenerator> {
    match target {
        Target::TypeBox => Box::new(TypeBox),
        Target::Zod => Box::new(ModelGenerator(Zod)),
        Target::Valibot => Box::new(ModelGenerator(Valibot)),
        Target::Yup => Box::new(ModelGenerator(Yup)),
        Target::Effect => Box::new(ModelGenerator(Effect)),
        Target::JsonSchema => Box::new(ModelGenerator(JsonSchema)),
        Target::Types => Box::new(Passthrough),
    }
}
