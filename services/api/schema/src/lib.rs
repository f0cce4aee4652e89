//! sea-orm entities for the YaMDb API database.

pub mod categories;
pub mod comments;
pub mod genres;
pub mod outbox_events;
pub mod reviews;
pub mod title_genres;
pub mod titles;
pub mod users;
