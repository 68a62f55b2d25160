pub mod document;
pub mod format;

pub use document::chunker::{chunk_text, Chunk, DEFAULT_MAX_CHUNK_SIZE};
pub use document::{is_supported_document, ExtractionError, PdfExtractor, TextExtractor};
pub use format::{format_paragraphs, split_sentences, SENTENCES_PER_PARAGRAPH};
