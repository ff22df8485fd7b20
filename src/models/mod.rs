pub mod enums;
pub mod question;

pub use enums::*;
pub use question::*;
