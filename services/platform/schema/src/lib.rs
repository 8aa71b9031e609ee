//! sea-orm entities for the platform service database.

pub mod albums;
pub mod listens;
pub mod outbox_events;
pub mod playlist_tracks;
pub mod playlists;
pub mod tracks;
pub mod users;
