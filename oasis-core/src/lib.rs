mod config;
mod matching;
mod seed;
mod util;
mod workout;

pub mod catalog;
pub use config::*;
pub use matching::*;
pub use seed::*;
pub use util::*;
pub use workout::*;
