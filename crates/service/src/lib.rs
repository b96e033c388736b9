//! Service layer: business operations over the `models` entities.
//! - Ads with their image gallery, bookings, comments.
//! - Registration and login (`auth`).
//! - The pagination core used by every paginated listing (`pagination`).

pub mod errors;
pub mod actor;
pub mod auth;
pub mod pagination;
pub mod ads;
pub mod bookings;
pub mod comments;
#[cfg(test)]
pub mod test_support;

pub use actor::Actor;
