pub mod playback;
pub mod search;
pub mod viewport;

pub use viewport::ViewportState;
