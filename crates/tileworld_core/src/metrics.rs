//! Run counters and structured logging setup.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tileworld_data::WorldEvent;

/// Ticks between periodic summaries.
pub const SUMMARY_INTERVAL: u64 = 1000;

/// Per-run simulation counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    tick_count: u64,
    agent_count: usize,
    counters: BTreeMap<&'static str, u64>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: 0,
            agent_count: 0,
            counters: BTreeMap::new(),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&mut self, duration: Duration, agents: usize) {
        self.tick_count += 1;
        self.agent_count = agents;

        if self.tick_count % SUMMARY_INTERVAL == 0 {
            tracing::info!(
                tick = self.tick_count,
                agents,
                spawned = self.counter("spawned"),
                kills = self.counter("kills"),
                starved = self.counter("starved"),
                packs_founded = self.counter("packs_founded"),
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    /// Counts the events of one tick.
    pub fn record_events(&mut self, events: &[WorldEvent]) {
        for event in events {
            let name = match event {
                WorldEvent::WorldReset { .. } => "resets",
                WorldEvent::AgentSpawned { .. } => "spawned",
                WorldEvent::PreyKilled { .. } => "kills",
                WorldEvent::Starved { .. } => "starved",
                WorldEvent::PackFounded { .. } => "packs_founded",
                WorldEvent::PackJoined { .. } | WorldEvent::Recruited { .. } => "pack_joins",
                WorldEvent::PackDissolved { .. } => "packs_dissolved",
            };
            self.increment_counter(name);
        }
    }

    pub fn increment_counter(&mut self, name: &'static str) {
        *self.counters.entry(name).or_insert(0) += 1;
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.agent_count
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs the global fmt subscriber. `RUST_LOG` overrides `default_level`.
/// Calling it twice is harmless.
pub fn init_logging(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish(),
    )
    .ok();
}
