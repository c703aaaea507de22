//! Plain data shared by every tileworld crate: terrain tiles, agents and the
//! events a tick reports back to its host.

pub mod data;

pub use data::entity::{
    Agent, AgentId, AgentKind, FishState, PackRole, PlayerState, Position, PreyState, Species,
    WanderState, WolfState,
};
pub use data::events::WorldEvent;
pub use data::terrain::{FeatureKind, Tile, TileCoord};
