pub mod category;
pub mod interaction;
pub mod media;
pub mod season;
pub mod suggestion;
pub mod user;
