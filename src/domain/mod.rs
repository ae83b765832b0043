pub mod assembler;
pub mod decoder;
pub mod duplicates;
pub mod models;
mod progress;

pub use assembler::MatchAssembler;
pub use decoder::decode_line;
pub use duplicates::{resolve_duplicates, DuplicateSummary};
pub use models::*;
pub use progress::ReadProgress;
