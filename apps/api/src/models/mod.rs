pub mod document;
pub mod tile;

pub use document::{Quest, QuestDocument, DEFAULT_TITLE};
pub use tile::{QuestTile, Side, SourceGame};
