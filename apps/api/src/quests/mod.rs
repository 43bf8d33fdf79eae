// Quest documents: persistence port, its two adapters and the HTTP handlers.

pub mod handlers;
pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use store::DocumentStore;
