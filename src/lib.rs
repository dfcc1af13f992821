//! sagatree: load an anime saga/arc/episode dataset, build a display
//! hierarchy with lookup indices, and filter the flat episode list.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
