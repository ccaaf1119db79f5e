/// Domain repositories
///
/// - `places`: the transactional place writer keeping `places` and
///   `users.place_ids` consistent

pub mod places;

pub use places::{NewPlace, PlaceRepoError, PlaceRepository, PlaceUpdate};
