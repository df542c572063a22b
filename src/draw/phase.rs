use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::draw::animation::SpinAnimation;

/// High-level phases of the draw view.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPhase {
    /// No animation in flight; a trigger is accepted.
    Idle,
    /// A draw cycle is running; further triggers are ignored.
    Spinning(SpinStage),
    /// The result was handed out and the carousel rests on the picked card.
    Settled {
        /// Pool index of the picked card.
        target_index: usize,
    },
}

/// Fine-grained stage of a running draw.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinStage {
    /// Waiting for the pick and locating it in the pool.
    Resolving,
    /// The carousel is moving towards the target.
    Animating(SpinAnimation),
    /// The carousel rests on the target and the result is held for the display delay.
    Landing {
        /// Pool index of the picked card.
        target_index: usize,
    },
}

/// Events applied to the [`DrawStateMachine`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    /// User asked for a draw.
    Trigger,
    /// The pick was found in the pool and the spin can start.
    PickResolved(SpinAnimation),
    /// The spin reached its end.
    Completed,
    /// The display delay elapsed and the result is handed out.
    Landed,
    /// The cycle failed or the view went away.
    Abort,
    /// Leave the settled display.
    Reset,
}

/// Error returned when an event does not apply to the current phase.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    pub from: DrawPhase,
    pub event: DrawEvent,
}

/// Coarse phase name used in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    Spinning,
    Settled,
}

/// Read-only view of the animation state.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    pub phase: PhaseKind,
    pub start_time: Option<Instant>,
    pub duration: Option<Duration>,
    pub target_index: Option<usize>,
    /// Scroll offset of the last drawn frame.
    pub current_offset: f64,
}

/// State machine guarding the draw cycle `Idle -> Spinning -> Settled -> Idle`.
#[derive(Debug, Clone)]
pub struct DrawStateMachine {
    phase: DrawPhase,
    /// Incremented each time a new cycle starts.
    cycle: u64,
    current_offset: f64,
}

impl Default for DrawStateMachine {
    fn default() -> Self {
        Self {
            phase: DrawPhase::Idle,
            cycle: 0,
            current_offset: 0.0,
        }
    }
}

impl DrawStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DrawPhase {
        &self.phase
    }

    /// Identifier of the current (or last) draw cycle.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, DrawPhase::Spinning(_))
    }

    /// Running animation, if the carousel is moving.
    pub fn animation(&self) -> Option<&SpinAnimation> {
        match &self.phase {
            DrawPhase::Spinning(SpinStage::Animating(spin)) => Some(spin),
            _ => None,
        }
    }

    pub fn current_offset(&self) -> f64 {
        self.current_offset
    }

    /// Record the offset of the frame that was just drawn.
    pub fn set_offset(&mut self, offset: f64) {
        self.current_offset = offset;
    }

    pub fn snapshot(&self) -> AnimationState {
        let (phase, spin, target_index) = match &self.phase {
            DrawPhase::Idle => (PhaseKind::Idle, None, None),
            DrawPhase::Spinning(SpinStage::Resolving) => (PhaseKind::Spinning, None, None),
            DrawPhase::Spinning(SpinStage::Animating(spin)) => {
                (PhaseKind::Spinning, Some(spin), Some(spin.target_index))
            }
            DrawPhase::Spinning(SpinStage::Landing { target_index }) => {
                (PhaseKind::Spinning, None, Some(*target_index))
            }
            DrawPhase::Settled { target_index } => (PhaseKind::Settled, None, Some(*target_index)),
        };
        AnimationState {
            phase,
            start_time: spin.map(|spin| spin.started_at),
            duration: spin.map(|spin| spin.duration),
            target_index,
            current_offset: self.current_offset,
        }
    }

    /// Apply `event`, returning the new phase.
    pub fn apply(&mut self, event: DrawEvent) -> Result<&DrawPhase, InvalidTransition> {
        let next = self.compute_transition(event.clone())?;
        if matches!(event, DrawEvent::Trigger) {
            self.cycle += 1;
        }
        self.phase = next;
        Ok(&self.phase)
    }

    fn compute_transition(&self, event: DrawEvent) -> Result<DrawPhase, InvalidTransition> {
        let next = match (&self.phase, event) {
            (DrawPhase::Idle | DrawPhase::Settled { .. }, DrawEvent::Trigger) => {
                DrawPhase::Spinning(SpinStage::Resolving)
            }
            (DrawPhase::Spinning(SpinStage::Resolving), DrawEvent::PickResolved(spin)) => {
                DrawPhase::Spinning(SpinStage::Animating(spin))
            }
            (DrawPhase::Spinning(SpinStage::Animating(spin)), DrawEvent::Completed) => {
                DrawPhase::Spinning(SpinStage::Landing {
                    target_index: spin.target_index,
                })
            }
            (DrawPhase::Spinning(SpinStage::Landing { target_index }), DrawEvent::Landed) => {
                DrawPhase::Settled {
                    target_index: *target_index,
                }
            }
            (DrawPhase::Spinning(_), DrawEvent::Abort) => DrawPhase::Idle,
            (DrawPhase::Idle | DrawPhase::Settled { .. }, DrawEvent::Reset) => DrawPhase::Idle,
            (from, event) => {
                return Err(InvalidTransition {
                    from: from.clone(),
                    event,
                });
            }
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spin(target: usize) -> SpinAnimation {
        SpinAnimation::new(target, 4, 3, 10.0, Duration::from_millis(3_500), Instant::now())
    }

    #[test]
    fn initial_state_is_idle() {
        let sm = DrawStateMachine::new();
        assert_eq!(sm.phase(), &DrawPhase::Idle);
        assert_eq!(sm.snapshot().phase, PhaseKind::Idle);
    }

    #[test]
    fn full_cycle_ends_settled_on_the_target() {
        let mut sm = DrawStateMachine::new();
        sm.apply(DrawEvent::Trigger).unwrap();
        assert_eq!(sm.cycle(), 1);
        sm.apply(DrawEvent::PickResolved(spin(2))).unwrap();

        let snapshot = sm.snapshot();
        assert_eq!(snapshot.phase, PhaseKind::Spinning);
        assert_eq!(snapshot.target_index, Some(2));
        assert!(snapshot.start_time.is_some());

        assert_eq!(
            sm.apply(DrawEvent::Completed).unwrap(),
            &DrawPhase::Spinning(SpinStage::Landing { target_index: 2 })
        );
        assert!(sm.is_spinning());
        assert_eq!(sm.snapshot().target_index, Some(2));
        assert_eq!(
            sm.apply(DrawEvent::Landed).unwrap(),
            &DrawPhase::Settled { target_index: 2 }
        );
        assert_eq!(sm.apply(DrawEvent::Reset).unwrap(), &DrawPhase::Idle);
    }

    #[test]
    fn landing_draw_refuses_trigger_and_reset() {
        let mut sm = DrawStateMachine::new();
        sm.apply(DrawEvent::Trigger).unwrap();
        sm.apply(DrawEvent::PickResolved(spin(3))).unwrap();
        sm.apply(DrawEvent::Completed).unwrap();

        assert!(sm.apply(DrawEvent::Trigger).is_err());
        assert!(sm.apply(DrawEvent::Reset).is_err());
        assert_eq!(sm.cycle(), 1);
        assert_eq!(sm.apply(DrawEvent::Abort).unwrap(), &DrawPhase::Idle);
    }

    #[test]
    fn trigger_while_spinning_is_rejected() {
        let mut sm = DrawStateMachine::new();
        sm.apply(DrawEvent::Trigger).unwrap();
        let err = sm.apply(DrawEvent::Trigger).unwrap_err();
        assert_eq!(err.from, DrawPhase::Spinning(SpinStage::Resolving));
        assert_eq!(sm.cycle(), 1);
    }

    #[test]
    fn settled_view_accepts_a_new_trigger() {
        let mut sm = DrawStateMachine::new();
        sm.apply(DrawEvent::Trigger).unwrap();
        sm.apply(DrawEvent::PickResolved(spin(0))).unwrap();
        sm.apply(DrawEvent::Completed).unwrap();
        sm.apply(DrawEvent::Landed).unwrap();
        sm.apply(DrawEvent::Trigger).unwrap();
        assert_eq!(sm.cycle(), 2);
        assert!(sm.is_spinning());
    }

    #[test]
    fn abort_returns_to_idle_from_any_spin_stage() {
        let mut sm = DrawStateMachine::new();
        sm.apply(DrawEvent::Trigger).unwrap();
        assert_eq!(sm.apply(DrawEvent::Abort).unwrap(), &DrawPhase::Idle);

        sm.apply(DrawEvent::Trigger).unwrap();
        sm.apply(DrawEvent::PickResolved(spin(1))).unwrap();
        assert_eq!(sm.apply(DrawEvent::Abort).unwrap(), &DrawPhase::Idle);
        assert!(sm.apply(DrawEvent::Completed).is_err());
    }
}
