//! Emitters: `discography.json`, the RSS feed and one HTML page per track.

mod entries;
mod html;
mod json;
mod pages;
mod rss;

pub use entries::{FeedEntry, SiteInfo, feed_entries};
pub use json::write_json;
pub use pages::write_pages;
pub use rss::write_feed;
