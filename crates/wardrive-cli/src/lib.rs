// wardrive turns a directory of capture CSVs into one GeoJSON document.
//
// Layers, bottom up:
// - types: observations, merged records, sessions
// - core: OUI vendor table and its on-disk cache
// - providers: header detection, row normalization, file discovery
// - engine: best-observation merge, routes, feature assembly
// - runtime: the file loop, counters, configuration
// - cli (this crate): arguments, console output, writing the document

mod args;
mod commands;
mod handlers;
pub mod presentation;
pub mod types;

pub use args::{BuildArgs, Cli, Commands, VendorCommand};
pub use commands::run;
