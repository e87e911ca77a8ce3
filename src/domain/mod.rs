//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod error;
pub mod node;
pub mod side;
pub mod store;

pub use error::{DomainError, DomainResult};
pub use node::{placeholder_image, DfsIter, FlatNode, TreeNode, ROOT_ID};
pub use side::Side;
pub use store::{Mutation, TreeStore};
