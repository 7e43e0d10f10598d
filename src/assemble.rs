//! Turns loaded content into the release list the site consumes.

mod order;
mod release;
mod validate;

use std::collections::HashSet;

use crate::content::{Artist, Collection, ContentLayout, ReleaseKind, TrackMap};

pub use order::{parse_release_date, sort_by_date_desc, sort_newest_first};
pub use release::*;
pub use validate::validate_collection;

/// Bucket collections into albums and EPs, collect singles, and order both
/// lists newest first. EPs share the `singles` array with real singles.
pub fn assemble_discography(
    layout: &ContentLayout,
    artist: &Artist,
    tracks: &TrackMap,
    collections: &[Collection],
) -> Discography {
    let mut albums = Vec::new();
    let mut eps = Vec::new();
    let mut referenced: HashSet<&str> = HashSet::new();

    for collection in collections {
        referenced.extend(collection.track_refs.iter().map(String::as_str));
        let release = assemble_collection(layout, collection, tracks);
        match &collection.kind {
            ReleaseKind::Album => albums.push(release),
            ReleaseKind::Ep => eps.push(release),
            ReleaseKind::Other(raw) => {
                tracing::warn!(
                    collection = %collection.slug,
                    "unknown collection type '{raw}', listing it with albums"
                );
                albums.push(release);
            }
        }
    }

    let mut singles: Vec<SinglesEntry> = tracks
        .values()
        .filter(|t| !referenced.contains(t.slug.as_str()))
        .map(|t| SinglesEntry::Single(assemble_single(layout, t)))
        .collect();
    singles.extend(eps.into_iter().map(SinglesEntry::Ep));

    sort_newest_first(&mut albums, |a| a.release_date.as_str());
    sort_newest_first(&mut singles, SinglesEntry::release_date);

    tracing::debug!(
        albums = albums.len(),
        singles = singles.len(),
        "assembled discography"
    );

    Discography {
        artist: artist.name.clone(),
        bio: artist.bio.clone(),
        social_links: OrderedMap(artist.social_links.clone()),
        albums,
        singles,
    }
}
