use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, never reused identifier of a live agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl AgentId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Continuous world position, measured in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_sq(self, other: Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(self, other: Position) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Heading in radians pointing from `self` towards `other`.
    #[inline]
    pub fn heading_to(self, other: Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Point reached by moving `distance` along `heading`.
    #[inline]
    pub fn step(self, heading: f64, distance: f64) -> Position {
        Position {
            x: self.x + heading.cos() * distance,
            y: self.y + heading.sin() * distance,
        }
    }
}

/// Species tag, also used to select update order and spawn rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Player,
    Fish,
    Pig,
    Cow,
    Wolf,
}

impl Species {
    /// Species wolves hunt.
    pub const PREY: [Species; 3] = [Species::Fish, Species::Pig, Species::Cow];
    /// Species that react to wolf alerts by fleeing.
    pub const SKITTISH: [Species; 2] = [Species::Pig, Species::Cow];
    /// Species placed by the spawn phase, in spawn order.
    pub const WILD: [Species; 4] = [Species::Fish, Species::Pig, Species::Cow, Species::Wolf];

    pub fn is_prey(self) -> bool {
        Self::PREY.contains(&self)
    }

    pub fn is_aquatic(self) -> bool {
        self == Species::Fish
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Player => "player",
            Species::Fish => "fish",
            Species::Pig => "pig",
            Species::Cow => "cow",
            Species::Wolf => "wolf",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Countdown-driven random walk shared by every wandering species.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WanderState {
    /// Ticks left until a new heading is picked. Zero forces a pick.
    pub timer: u32,
    /// Whether the agent walks during the current cadence.
    pub moving: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    pub sprinting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FishState {
    pub wander: WanderState,
    pub health: f32,
}

/// Pig and cow state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreyState {
    pub wander: WanderState,
    pub health: f32,
    /// Wolf this animal is running from. Weak: may name a removed agent.
    pub flee_target: Option<AgentId>,
}

/// Position of a wolf in the pack structure. A wolf holds exactly one role.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PackRole {
    #[default]
    Free,
    Member {
        leader: AgentId,
    },
    Leader {
        members: Vec<AgentId>,
    },
}

impl PackRole {
    pub fn is_free(&self) -> bool {
        matches!(self, PackRole::Free)
    }

    pub fn is_leader(&self) -> bool {
        matches!(self, PackRole::Leader { .. })
    }

    pub fn leader(&self) -> Option<AgentId> {
        match self {
            PackRole::Member { leader } => Some(*leader),
            _ => None,
        }
    }

    pub fn members(&self) -> &[AgentId] {
        match self {
            PackRole::Leader { members } => members,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WolfState {
    pub wander: WanderState,
    /// Always within `[0, starvation_threshold)` while the wolf is alive.
    pub hunger: f32,
    pub is_hunting: bool,
    pub hunt_target: Option<AgentId>,
    pub pack: PackRole,
    pub wants_pack: bool,
    /// Prey this wolf has seen while scouting for its leader.
    pub spotted_prey: Option<AgentId>,
    /// Sighting reported by a member; consumed on the leader's next re-search.
    pub alerted_prey: Option<AgentId>,
}

impl WolfState {
    pub fn new(wants_pack: bool) -> Self {
        Self {
            wander: WanderState::default(),
            hunger: 0.0,
            is_hunting: false,
            hunt_target: None,
            pack: PackRole::Free,
            wants_pack,
            spotted_prey: None,
            alerted_prey: None,
        }
    }

    /// Drops every hunting reference, used after a meal.
    pub fn clear_hunt(&mut self) {
        self.is_hunting = false;
        self.hunt_target = None;
        self.spotted_prey = None;
        self.alerted_prey = None;
    }
}

/// Species-specific state. Shared fields live on [`Agent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AgentKind {
    Player(PlayerState),
    Fish(FishState),
    Pig(PreyState),
    Cow(PreyState),
    Wolf(WolfState),
}

impl AgentKind {
    pub const PREY_HEALTH: f32 = 100.0;

    /// Fresh state for a newly spawned agent of `species`.
    pub fn new(species: Species, wants_pack: bool) -> Self {
        let prey = PreyState {
            wander: WanderState::default(),
            health: Self::PREY_HEALTH,
            flee_target: None,
        };
        match species {
            Species::Player => AgentKind::Player(PlayerState::default()),
            Species::Fish => AgentKind::Fish(FishState {
                wander: WanderState::default(),
                health: Self::PREY_HEALTH,
            }),
            Species::Pig => AgentKind::Pig(prey),
            Species::Cow => AgentKind::Cow(prey),
            Species::Wolf => AgentKind::Wolf(WolfState::new(wants_pack)),
        }
    }

    pub fn species(&self) -> Species {
        match self {
            AgentKind::Player(_) => Species::Player,
            AgentKind::Fish(_) => Species::Fish,
            AgentKind::Pig(_) => Species::Pig,
            AgentKind::Cow(_) => Species::Cow,
            AgentKind::Wolf(_) => Species::Wolf,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub position: Position,
    /// Radians, world space.
    pub heading: f64,
    pub kind: AgentKind,
}

impl Agent {
    pub fn species(&self) -> Species {
        self.kind.species()
    }

    pub fn wolf(&self) -> Option<&WolfState> {
        match &self.kind {
            AgentKind::Wolf(w) => Some(w),
            _ => None,
        }
    }

    pub fn wolf_mut(&mut self) -> Option<&mut WolfState> {
        match &mut self.kind {
            AgentKind::Wolf(w) => Some(w),
            _ => None,
        }
    }

    /// Pig/cow state, the only agents that flee.
    pub fn prey(&self) -> Option<&PreyState> {
        match &self.kind {
            AgentKind::Pig(p) | AgentKind::Cow(p) => Some(p),
            _ => None,
        }
    }

    pub fn prey_mut(&mut self) -> Option<&mut PreyState> {
        match &mut self.kind {
            AgentKind::Pig(p) | AgentKind::Cow(p) => Some(p),
            _ => None,
        }
    }

    pub fn health(&self) -> Option<f32> {
        match &self.kind {
            AgentKind::Fish(f) => Some(f.health),
            AgentKind::Pig(p) | AgentKind::Cow(p) => Some(p.health),
            _ => None,
        }
    }
}
