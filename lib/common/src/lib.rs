pub mod error;

pub use error::PlayerError;
