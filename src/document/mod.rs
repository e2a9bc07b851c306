mod error;
mod factory;
mod market_document;
mod writer;

pub use error::DocumentError;
pub use factory::DocumentFactory;
pub use market_document::MarketDocument;
pub use writer::{DocumentHeader, DocumentWriter};
