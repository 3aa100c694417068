pub use super::categories::Entity as Categories;
pub use super::content_suggestions::Entity as ContentSuggestions;
pub use super::episodes::Entity as Episodes;
pub use super::favorites::Entity as Favorites;
pub use super::media::Entity as Media;
pub use super::media_categories::Entity as MediaCategories;
pub use super::profiles::Entity as Profiles;
pub use super::ratings::Entity as Ratings;
pub use super::seasons::Entity as Seasons;
pub use super::suggestion_votes::Entity as SuggestionVotes;
pub use super::users::Entity as Users;
pub use super::watch_history::Entity as WatchHistory;
