//! Streaming-link auto-discovery.
//!
//! For every track and collection with an empty `spotify`, `apple_music`,
//! `tidal` or `deezer` field, the catalogs are searched for the artist's
//! release and accepted hits are written back into the markdown source.

mod apple;
mod deezer;
mod matching;
mod provider;
mod resolver;
mod spotify;
mod tidal;

pub use provider::LookupKind;
#[cfg(test)]
pub use provider::CatalogProvider;
pub use resolver::StreamingResolver;

#[cfg(test)]
mod tests;
