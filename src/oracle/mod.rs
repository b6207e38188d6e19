// Classification oracle: the boundary to an external text classifier.
//
// The engine never interprets documents semantically itself. When a caller
// wants a second opinion (typically an LLM), text is cleaned, cut into
// overlapping chunks, and each chunk is handed to a ClassificationOracle.
// Whatever comes back is parsed fail-closed: anything malformed counts as
// "no" with zero confidence.

pub mod batch;
pub mod chunk;
pub mod command;
pub mod response;
pub mod traits;

pub use batch::{classify_files, ClassifiedFile};
pub use chunk::{chunk_text, classify_document, clean_text, ChunkPolicy, OracleDecision};
pub use command::CommandOracle;
pub use response::parse_response;
pub use traits::{Answer, ClassificationOracle, OracleAnswer};
