pub mod list;
pub mod misc;
mod shared;
pub mod watch;

pub use list::list;
pub use misc::{generate_completions, save_language};
pub use watch::watch;
