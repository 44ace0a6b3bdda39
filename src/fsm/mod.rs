//! Distributed extinguish-cycle state machine.
//!
//! There is no central FSM engine.  The state is a single shared
//! [`Phase`] code, and each edge of the cycle is owned by exactly one
//! periodic task that polls the phase and advances it when its hardware
//! condition holds:
//!
//! ```text
//!          Thermal Watch            Limit Switch A
//!        [temp >= threshold]      [outward end pressed]
//!  IDLE(0) ───────────────▶ IGNITE(1) ───────────────▶ RETURNING(2)
//!     ▲                                                     │
//!     │  Sequencer                          Limit Switch B  │
//!     │  [motor stopped]                 [home end pressed] │
//!     └──────────────────── HOME(3) ◀───────────────────────┘
//! ```
//!
//! Because every phase has exactly one legal writer, and a writer only
//! stores after observing its own precondition, no update can be lost
//! even though tasks interleave arbitrarily.  Any phase value outside the
//! table matches no guard and is left untouched by every task.

pub mod shared;

pub use shared::SharedCell;

// ---------------------------------------------------------------------------
// Phase codes
// ---------------------------------------------------------------------------

/// Shared extinguish-cycle phase code.
///
/// A transparent `u8` rather than a closed enum: unknown codes must stay
/// representable so that tasks can ignore them instead of faulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Phase(pub u8);

impl Phase {
    /// Watching for fire; motor at rest.
    pub const IDLE: Self = Self(0);
    /// Fire detected; motor driving outward onto the extinguisher lever.
    pub const IGNITE: Self = Self(1);
    /// Lever actuated; motor driving back to its rest position.
    pub const RETURNING: Self = Self(2);
    /// Rest position reached; motor halt requested.
    pub const HOME: Self = Self(3);

    /// Raw phase code.
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Human-readable name, `"unknown"` for codes outside the cycle.
    pub fn name(self) -> &'static str {
        match self {
            Self::IDLE => "Idle",
            Self::IGNITE => "Ignite",
            Self::RETURNING => "Returning",
            Self::HOME => "Home",
            _ => "unknown",
        }
    }
}

impl From<u8> for Phase {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}({})", self.name(), self.0)
    }
}

/// The cross-task phase variable.
pub type PhaseCell = SharedCell<Phase>;

// ---------------------------------------------------------------------------
// Transition table
// ---------------------------------------------------------------------------

/// One edge of the cycle and the task that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    pub writer: &'static str,
}

/// Writer names, shared by the tasks and the transition table.
pub mod writers {
    pub const THERMAL_WATCH: &str = "thermal-watch";
    pub const OUTWARD_SWITCH: &str = "outward-switch";
    pub const RETURN_SWITCH: &str = "return-switch";
    pub const SEQUENCER: &str = "sequencer";
}

/// Fire detected: idle → ignite.
pub const FIRE_DETECTED: Transition = Transition {
    from: Phase::IDLE,
    to: Phase::IGNITE,
    writer: writers::THERMAL_WATCH,
};

/// Outward end of travel reached: ignite → returning.
pub const OUTWARD_COMPLETE: Transition = Transition {
    from: Phase::IGNITE,
    to: Phase::RETURNING,
    writer: writers::OUTWARD_SWITCH,
};

/// Rest position reached: returning → home.
pub const RETURN_COMPLETE: Transition = Transition {
    from: Phase::RETURNING,
    to: Phase::HOME,
    writer: writers::RETURN_SWITCH,
};

/// Motor halted: home → idle, closing the cycle.
pub const CYCLE_RESET: Transition = Transition {
    from: Phase::HOME,
    to: Phase::IDLE,
    writer: writers::SEQUENCER,
};

/// Every legal phase write in the system.
pub const TRANSITIONS: [Transition; 4] =
    [FIRE_DETECTED, OUTWARD_COMPLETE, RETURN_COMPLETE, CYCLE_RESET];

impl Transition {
    /// Apply this edge to `cell` if its precondition holds.
    ///
    /// Returns `true` if the phase was written.
    pub fn fire(&self, cell: &PhaseCell) -> bool {
        let fired = cell.advance(self.from, self.to);
        if fired {
            log::info!("Phase: {} -> {} ({})", self.from, self.to, self.writer);
        }
        fired
    }

    /// The edge leaving `phase`, if any.
    pub fn leaving(phase: Phase) -> Option<&'static Transition> {
        TRANSITIONS.iter().find(|t| t.from == phase)
    }
}
