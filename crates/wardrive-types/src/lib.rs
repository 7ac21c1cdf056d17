pub mod domain;
pub mod observation;
mod util;

pub use domain::*;
pub use observation::*;
pub use util::*;
