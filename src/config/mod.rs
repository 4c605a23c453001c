pub mod load;
pub mod types;

pub use types::{Config, ExitCodePolicy, Language, UserSettings};
