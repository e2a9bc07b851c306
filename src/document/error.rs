use thiserror::Error;

use crate::message::{DocumentFormat, DocumentType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// No registered writer renders this combination. A configuration gap,
    /// not a transient failure.
    #[error("no document writer handles {document_type} in format {format}")]
    UnhandledCombination {
        document_type: DocumentType,
        format: DocumentFormat,
    },
    #[error("bundle {0} has no messages to render")]
    EmptyBundle(String),
    #[error("document writer failed: {0}")]
    Write(String),
}
