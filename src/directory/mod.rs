//! Agent directory: the remote agent/profile contract and its wire types.

pub mod contract;
pub mod memory;
pub mod types;

pub use contract::AgentDirectory;
pub use memory::InMemoryDirectory;
pub use types::{AgentRecord, AgentResponse, ProfileSkillsResponse, RemoteStatus, TreeItem};
