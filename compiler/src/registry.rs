use crate::{
    error::{GenError, Result},
    types::Artifact,
};

/// Append-only collection of the artifacts produced during a run.
#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    artifacts: Vec<Artifact>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        ArtifactRegistry::default()
    }

    /// Adds `artifact`; a second artifact for an already-registered path is
    /// rejected since every file is emitted exactly once.
    pub fn register(&mut self, artifact: Artifact) -> Result<()> {
        if self.artifacts.iter().any(|a| a.path() == artifact.path()) {
            return Err(GenError::DuplicateArtifact(artifact.path().to_string()));
        }
        self.artifacts.push(artifact);
        Ok(())
    }

    pub fn all(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn into_artifacts(self) -> Vec<Artifact> {
        self.artifacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_registration_order() {
        let mut registry = ArtifactRegistry::new();
        registry.register(Artifact::new("b.amzn.go", "b")).unwrap();
        registry.register(Artifact::new("a.amzn.go", "a")).unwrap();
        let paths: Vec<_> = registry.all().iter().map(Artifact::path).collect();
        assert_eq!(paths, ["b.amzn.go", "a.amzn.go"]);
    }

    #[test]
    fn rejects_duplicate_path() {
        let mut registry = ArtifactRegistry::new();
        registry.register(Artifact::new("a.amzn.go", "first")).unwrap();
        let err = registry.register(Artifact::new("a.amzn.go", "second")).unwrap_err();
        assert!(matches!(err, GenError::DuplicateArtifact(ref p) if p == "a.amzn.go"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.all()[0].content(), "first");
    }
}
