use crate::model::world::{PlayerInput, World};
use std::time::Instant;
use tileworld_core::systems::{self, movement};
use tileworld_data::{AgentId, WorldEvent};

impl World {
    /// Runs exactly one tick: spawn phase, then every species update.
    ///
    /// Ticks are fixed-size, so `delta` does not scale movement. The clock's
    /// pause state is not consulted.
    pub fn advance(&mut self, _delta: f64) -> Vec<WorldEvent> {
        let start = Instant::now();
        let ctx = systems::SystemContext::new(&self.map, &self.config);
        let events = systems::run_tick(ctx, &mut self.entities, &mut self.rng);
        self.clock.record_tick();
        self.metrics.record_events(&events);
        self.metrics.record_tick(start.elapsed(), self.entities.len());
        events
    }

    /// One rendered frame: player input once, then as many ticks as the
    /// clock grants (none while paused).
    pub fn advance_frame(&mut self, delta: f64, input: Option<PlayerInput>) -> Vec<WorldEvent> {
        if let (Some(input), Some(player)) = (input, self.player) {
            self.move_entity(player, input.direction, input.sprinting);
        }
        let passes = self.clock.frame(delta);
        let mut events = Vec::new();
        for _ in 0..passes {
            events.extend(self.advance(delta));
        }
        events
    }

    /// Applies movement input to the player. Returns whether it moved.
    pub fn move_entity(&mut self, id: AgentId, direction: (f64, f64), sprinting: bool) -> bool {
        let ctx = systems::SystemContext::new(&self.map, &self.config);
        movement::move_player(ctx, &mut self.entities, id, direction, sprinting)
    }
}
