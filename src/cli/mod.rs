pub mod output;
pub mod session;

pub use session::{MenuChoice, Session};
