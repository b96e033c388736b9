pub mod errors;
pub mod db;
pub mod user;
pub mod ad;
pub mod image;
pub mod booking;
pub mod comment;

#[cfg(test)]
mod tests;
