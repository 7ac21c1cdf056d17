pub mod cache;
pub mod error;
pub mod oui;
pub mod path;

pub use cache::{CacheStatus, OuiCache};
pub use error::{Error, Result};
pub use oui::{VendorTable, is_locally_administered};
pub use path::{expand_tilde, resolve_data_dir};
