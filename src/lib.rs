pub mod core;
pub mod game;
pub mod networking;

pub use game::{GameSession, SessionPlugin};
pub use networking::SessionLink;
