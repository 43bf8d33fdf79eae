// Tile catalog and random board generation.

pub mod board;
pub mod handlers;
pub mod tiles;

pub use board::generate_board;
pub use tiles::TileCatalog;
