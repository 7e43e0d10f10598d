//! The content tree: tracks, collections and the artist record.
//!
//! ```text
//! music/
//! ├── artist/artist.md
//! ├── tracks/<slug>/track.md, <slug>.mp3, <slug>.txt, <slug>.jpg
//! └── collections/<slug>/collection.md, <slug>.jpg
//! ```
//!
//! Singles are tracks no collection references.

mod layout;
mod model;
mod scan;
mod store;

pub use layout::ContentLayout;
pub use model::*;
pub use scan::*;
pub use store::*;

#[cfg(test)]
mod tests;
