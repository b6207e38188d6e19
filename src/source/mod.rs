// Document sources: find candidate files and decode their text.

pub mod read;
pub mod walk;

pub use read::{read_text, DecodedText, TextEncoding};
pub use walk::{iter_paths, matches_extension, parse_extensions, DEFAULT_EXTENSIONS};
