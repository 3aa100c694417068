pub mod prelude;

pub mod categories;
pub mod content_suggestions;
pub mod episodes;
pub mod favorites;
pub mod media;
pub mod media_categories;
pub mod profiles;
pub mod ratings;
pub mod seasons;
pub mod suggestion_votes;
pub mod users;
pub mod watch_history;
