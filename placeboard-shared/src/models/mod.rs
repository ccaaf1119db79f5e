/// Database models
///
/// - `user`: account records owning zero or more places
/// - `place`: point-of-interest records with an owning user
///
/// Models expose single-row reads and writes only. The paired writes that
/// keep `users.place_ids` and `places.creator` consistent live in
/// `crate::repo::places` and must not be reimplemented elsewhere.

pub mod place;
pub mod user;

pub use place::Place;
pub use user::User;
