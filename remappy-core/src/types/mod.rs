pub mod action;
pub mod keys;
pub mod errors;

pub use action::*;
pub use keys::*;
pub use errors::*;
