pub use tileworld_core::TerrainLogic;
pub mod clock {
    pub use tileworld_core::clock::*;
}
pub mod config {
    pub use tileworld_core::config::*;
}
pub mod entity_store {
    pub use tileworld_core::entity_store::*;
}
pub mod metrics {
    pub use tileworld_core::metrics::*;
}
pub mod snapshot {
    pub use tileworld_core::snapshot::*;
}
pub mod terrain {
    pub use tileworld_core::terrain::*;
}
pub mod state {
    pub use tileworld_data::*;
}

pub mod world;
