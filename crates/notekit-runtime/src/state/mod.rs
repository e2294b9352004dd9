//! View state owned by a front end and kept in sync through interaction
//! events.

mod feed;
mod profile;
mod search;
mod waterfall;

pub use feed::FeedView;
pub use profile::{ProfileTab, ProfileView};
pub use search::SearchResults;
pub use waterfall::{NoteList, Waterfall};
