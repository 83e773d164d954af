use thiserror::Error;

/// Failure to obtain a remote module.
///
/// Cloneable so one failed import can be handed to every caller that was
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleLoadError {
    #[error("failed to import {module}: {message}")]
    Import { module: String, message: String },
    #[error("{module} is not exposed by the remote container")]
    NotExposed { module: String },
    #[error("{module} does not export {expected}")]
    UnexpectedExport {
        module: String,
        expected: &'static str,
    },
    #[error("import of {module} was abandoned before it completed")]
    Abandoned { module: String },
}

impl ModuleLoadError {
    pub fn module(&self) -> &str {
        match self {
            Self::Import { module, .. }
            | Self::NotExposed { module }
            | Self::UnexpectedExport { module, .. }
            | Self::Abandoned { module } => module,
        }
    }
}
