//! kintree: family tree manager
//!
//! Two independent trees ("fatherside" and "motherside") of named,
//! pictured nodes, persisted as JSON snapshots and edited through the
//! CLI. Layered: domain (tree model), application (load/mutate/persist),
//! infrastructure (snapshot slots), cli (clap surface).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod render;
pub mod util;

pub use application::TreeService;
pub use domain::{FlatNode, Mutation, Side, TreeNode, TreeStore, ROOT_ID};
