/// Authentication primitives
///
/// Only password hashing lives here; there is no session or token layer.

pub mod password;
