// Quest sheet layout: font metrics, text pagination, page composition.
// Everything here is synchronous and pure; handlers call it directly.

pub mod assets;
pub mod composer;
pub mod font_metrics;
pub mod handlers;
pub mod page;
pub mod paginator;
pub mod sheet;

// Re-export the public API consumed by other modules (handlers, state, main).
pub use assets::AssetManifest;
pub use font_metrics::FontFamily;
pub use page::{default_layout_config, LayoutConfig};
pub use sheet::{build_sheet, Sheet, SheetRequest};
