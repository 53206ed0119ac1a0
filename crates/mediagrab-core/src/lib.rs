mod error;
mod input;
mod record;

pub use error::{MediaError, MediaResult};
pub use input::{load_input_urls, parse_input_urls};
pub use record::{
    ExtractionRecord, FAILED_TITLE, MediaItem, MediaKind, RecordKind, UNKNOWN_AUTHOR,
};
