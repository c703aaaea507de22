use super::entity::{AgentId, Position, Species};
use serde::{Deserialize, Serialize};

/// Notable things that happened during a tick or a regeneration.
///
/// Hosts use these for camera re-centering and UI notices; the simulation
/// itself never reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// Terrain was rebuilt; the player now stands at `spawn`.
    WorldReset { spawn: Position, size: u32 },
    AgentSpawned { id: AgentId, species: Species },
    PreyKilled { predator: AgentId, prey: AgentId, species: Species },
    Starved { id: AgentId },
    PackFounded { leader: AgentId },
    PackJoined { leader: AgentId, member: AgentId },
    Recruited { leader: AgentId, member: AgentId },
    PackDissolved { leader: AgentId, released: usize },
}
