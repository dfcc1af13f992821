//! Domain layer: dataset entities, hierarchy builder and filter engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod filter;
pub mod hierarchy;
pub mod table;

pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use filter::{arc_options, filter_episodes, FilterState};
pub use hierarchy::{HierarchyNode, Indices, NodeType};
pub use table::EpisodeRow;
