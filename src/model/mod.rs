mod event;
mod room;

pub use event::*;
pub use room::*;
