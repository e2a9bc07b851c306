use tracing::debug;

use super::{DocumentError, DocumentHeader, DocumentWriter};
use crate::message::{DocumentFormat, DocumentType, MessageRecord, OutgoingMessage};

/// Dispatches a bundle to the writer registered for its type and format.
#[derive(Default)]
pub struct DocumentFactory {
    writers: Vec<Box<dyn DocumentWriter>>,
}

impl DocumentFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a writer (builder style).
    pub fn with_writer(mut self, writer: impl DocumentWriter + 'static) -> Self {
        self.register(Box::new(writer));
        self
    }

    pub fn register(&mut self, writer: Box<dyn DocumentWriter>) {
        self.writers.push(writer);
    }

    pub fn supports(&self, document_type: DocumentType, format: DocumentFormat) -> bool {
        self.writer_for(document_type, format).is_some()
    }

    pub fn create(
        &self,
        header: &DocumentHeader,
        messages: &[OutgoingMessage],
        format: DocumentFormat,
    ) -> Result<Vec<u8>, DocumentError> {
        let writer = self
            .writer_for(header.document_type, format)
            .ok_or(DocumentError::UnhandledCombination {
                document_type: header.document_type,
                format,
            })?;

        let records: Vec<MessageRecord> = messages.iter().map(|m| m.record().clone()).collect();
        debug!(
            document_id = %header.document_id,
            document_type = %header.document_type,
            %format,
            records = records.len(),
            "rendering document"
        );
        writer.write(header, &records)
    }

    fn writer_for(
        &self,
        document_type: DocumentType,
        format: DocumentFormat,
    ) -> Option<&dyn DocumentWriter> {
        self.writers
            .iter()
            .find(|w| w.handles_type(document_type) && w.handles_format(format))
            .map(|w| w.as_ref())
    }
}
