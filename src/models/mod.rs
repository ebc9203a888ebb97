pub mod analysis;
pub mod report;
pub mod sample;
pub mod user;

pub use analysis::*;
pub use report::*;
pub use sample::*;
pub use user::*;
