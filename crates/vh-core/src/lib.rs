pub mod id;
pub mod model;
pub mod search;
pub mod seed;

pub use id::NodeId;
pub use model::*;
pub use search::{SearchResult, search};
pub use seed::{parse_tree, vessel_hierarchy};
