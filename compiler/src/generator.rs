use amzn_schema::File;
use tracing::{error, info, info_span};

use crate::{
    emit::emit,
    error::{GenError, Result},
    params::Parameters,
    registry::ArtifactRegistry,
    templates::{DispatchTable, HandlebarsResolver},
    traits::TemplateResolver,
    types::Artifact,
    verifier::verify_parameters,
};

/// Name this generator is registered under by hosts.
pub const MODULE_NAME: &str = "amzn";

/// Drives a run: one artifact per input file, in input order.
#[derive(Debug)]
pub struct Generator<R = HandlebarsResolver> {
    resolver: R,
    params:   Parameters,
    registry: ArtifactRegistry,
}

impl Generator<HandlebarsResolver> {
    pub fn new(params: Parameters) -> Self {
        Generator::with_resolver(HandlebarsResolver, params)
    }
}

impl<R: TemplateResolver> Generator<R> {
    pub fn with_resolver(resolver: R, params: Parameters) -> Self {
        Generator {
            resolver,
            params,
            registry: ArtifactRegistry::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        MODULE_NAME
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Emits every file and registers its artifact, stopping at the first
    /// failure. Artifacts registered before the failure stay in
    /// [`Generator::registry`].
    pub fn execute(&mut self, files: &[File]) -> Result<()> {
        verify_parameters(&self.params)?;
        let table = DispatchTable::build(&self.resolver, &self.params)?;

        for file in files {
            let _span = info_span!("file", name = %file.name).entered();
            let artifact = emit(file, &table).map_err(|err| {
                error!(error = %err, "generation aborted");
                err
            })?;
            info!(path = artifact.path(), "registering artifact");
            self.registry.register(artifact).map_err(|err| {
                error!(error = %err, "generation aborted");
                GenError::File {
                    file:   file.name.clone(),
                    source: Box::new(err),
                }
            })?;
        }
        Ok(())
    }

    pub fn registry(&self) -> &ArtifactRegistry {
        &self.registry
    }

    pub fn into_artifacts(self) -> Vec<Artifact> {
        self.registry.into_artifacts()
    }
}

/// Runs the built-in templates over `files` and returns every artifact.
pub fn generate(files: &[File], params: Parameters) -> Result<Vec<Artifact>> {
    let mut generator = Generator::new(params);
    generator.execute(files)?;
    Ok(generator.into_artifacts())
}
