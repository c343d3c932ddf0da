mod filter;
mod resolver;
mod types;
mod utils;
mod ytdlp;

pub use filter::{classify, parse_media_types, MediaFilter};
pub use resolver::Resolver;
pub use types::{ClassifiedAsset, ExtractionResult, MediaType, RawExtraction, RawFormat};
pub use utils::{human_readable_size, parse_file_size_limit, resolution_to_number};
pub use ytdlp::YtDlpResolver;
