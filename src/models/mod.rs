pub mod event;
pub mod repo;
pub mod snapshot;
pub mod user;

pub use event::*;
pub use repo::*;
pub use snapshot::*;
pub use user::*;
