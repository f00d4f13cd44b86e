pub mod error;
pub mod session;
pub mod state;

pub use error::CopyError;
pub use session::{CONFIRM_WINDOW, CopyOutcome, CopySessionManager};
pub use state::CopyState;
