pub mod filters;
pub mod message;
pub mod pins;
pub mod sort;

pub use filters::*;
pub use message::Message;
pub use pins::*;
pub use sort::*;
