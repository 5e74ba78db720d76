//! State Machine Runtime
//!
//! Typed flat statecharts for small interaction states (form submission,
//! copy confirmation). Supports:
//! - Guards (conditional transitions)
//! - Entry/exit actions
//! - Transition actions
//! - Transition history
//!
//! States and events are caller-defined `Copy` enums, so an unknown state or
//! event is a compile error rather than a silent no-op.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt::Debug;
use std::hash::Hash;

/// Bounds shared by state and event types
pub trait StateKey: Copy + Eq + Hash + Debug + 'static {}

impl<T: Copy + Eq + Hash + Debug + 'static> StateKey for T {}

/// A guard function that determines if a transition should occur
pub type Guard = Box<dyn Fn() -> bool>;

/// An action function executed during transitions
pub type Action = Box<dyn FnMut()>;

/// A transition in the state machine
pub struct Transition<S, E> {
    pub from_state: S,
    pub event: E,
    pub to_state: S,
    pub guard: Option<Guard>,
    pub actions: SmallVec<[Action; 2]>,
}

impl<S: StateKey, E: StateKey> Transition<S, E> {
    /// Create a simple transition without guard or actions
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
            guard: None,
            actions: SmallVec::new(),
        }
    }

    /// Add a guard condition
    pub fn with_guard<F: Fn() -> bool + 'static>(mut self, guard: F) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Add an action to execute during transition
    pub fn with_action<F: FnMut() + 'static>(mut self, action: F) -> Self {
        self.actions.push(Box::new(action));
        self
    }

    fn matches(&self, state: S, event: E) -> bool {
        self.from_state == state
            && self.event == event
            && self.guard.as_ref().map_or(true, |guard| guard())
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: Vec<Transition<S, E>>,
    entry_callbacks: FxHashMap<S, Vec<Action>>,
    exit_callbacks: FxHashMap<S, Vec<Action>>,
}

impl<S: StateKey, E: StateKey> StateMachineBuilder<S, E> {
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
            entry_callbacks: FxHashMap::default(),
            exit_callbacks: FxHashMap::default(),
        }
    }

    /// Add a transition
    pub fn transition(mut self, transition: Transition<S, E>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add a simple transition (from, event, to)
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    /// Add an entry action for a state
    pub fn on_enter<F: FnMut() + 'static>(mut self, state: S, action: F) -> Self {
        self.entry_callbacks
            .entry(state)
            .or_default()
            .push(Box::new(action));
        self
    }

    /// Add an exit action for a state
    pub fn on_exit<F: FnMut() + 'static>(mut self, state: S, action: F) -> Self {
        self.exit_callbacks
            .entry(state)
            .or_default()
            .push(Box::new(action));
        self
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            entry_callbacks: self.entry_callbacks,
            exit_callbacks: self.exit_callbacks,
            history: Vec::new(),
        }
    }
}

/// A state machine instance
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: Vec<Transition<S, E>>,
    entry_callbacks: FxHashMap<S, Vec<Action>>,
    exit_callbacks: FxHashMap<S, Vec<Action>>,
    history: Vec<(S, E, S)>,
}

impl<S: StateKey, E: StateKey> StateMachine<S, E> {
    /// Create a new state machine with an initial state and transitions
    pub fn new(initial_state: S, transitions: Vec<Transition<S, E>>) -> Self {
        Self {
            current_state: initial_state,
            transitions,
            entry_callbacks: FxHashMap::default(),
            exit_callbacks: FxHashMap::default(),
            history: Vec::new(),
        }
    }

    /// Create a builder for a state machine
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, E, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: E) -> bool {
        let current = self.current_state;
        self.transitions.iter().any(|t| t.matches(current, event))
    }

    /// Send an event, returning the (possibly unchanged) current state.
    ///
    /// The first matching transition in declaration order wins. Events with
    /// no matching transition are ignored.
    pub fn send(&mut self, event: E) -> S {
        let current = self.current_state;

        let Some(idx) = self
            .transitions
            .iter()
            .position(|t| t.matches(current, event))
        else {
            tracing::trace!(state = ?current, event = ?event, "fsm: event ignored");
            return current;
        };

        let to_state = self.transitions[idx].to_state;

        if let Some(callbacks) = self.exit_callbacks.get_mut(&current) {
            for callback in callbacks.iter_mut() {
                callback();
            }
        }

        for action in self.transitions[idx].actions.iter_mut() {
            action();
        }

        self.current_state = to_state;
        self.history.push((current, event, to_state));

        if let Some(callbacks) = self.entry_callbacks.get_mut(&to_state) {
            for callback in callbacks.iter_mut() {
                callback();
            }
        }

        to_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Status {
        Idle,
        Pending,
        Success,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Signal {
        Submit,
        Ok,
        Failed,
        Expire,
    }

    fn submission() -> StateMachine<Status, Signal> {
        StateMachine::new(
            Status::Idle,
            vec![
                Transition::new(Status::Idle, Signal::Submit, Status::Pending),
                Transition::new(Status::Pending, Signal::Ok, Status::Success),
                Transition::new(Status::Pending, Signal::Failed, Status::Idle),
                Transition::new(Status::Success, Signal::Expire, Status::Idle),
            ],
        )
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = submission();
        assert_eq!(fsm.current_state(), Status::Idle);

        fsm.send(Signal::Submit);
        assert_eq!(fsm.current_state(), Status::Pending);

        fsm.send(Signal::Ok);
        assert!(fsm.is_in(Status::Success));

        fsm.send(Signal::Expire);
        assert!(fsm.is_in(Status::Idle));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = submission();

        // Ok is only valid while pending
        fsm.send(Signal::Ok);
        assert_eq!(fsm.current_state(), Status::Idle);
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_guard_conditions() {
        let enabled = Rc::new(Cell::new(true));
        let guard_flag = enabled.clone();

        let mut fsm = StateMachine::builder(Status::Idle)
            .transition(
                Transition::new(Status::Idle, Signal::Submit, Status::Pending)
                    .with_guard(move || guard_flag.get()),
            )
            .on(Status::Pending, Signal::Failed, Status::Idle)
            .build();

        fsm.send(Signal::Submit);
        assert_eq!(fsm.current_state(), Status::Pending);
        fsm.send(Signal::Failed);

        enabled.set(false);
        fsm.send(Signal::Submit);
        assert_eq!(fsm.current_state(), Status::Idle);
        assert!(!fsm.can_send(Signal::Submit));
    }

    #[test]
    fn test_entry_exit_callbacks() {
        let entered = Rc::new(Cell::new(0));
        let exited = Rc::new(Cell::new(0));
        let entered_clone = entered.clone();
        let exited_clone = exited.clone();

        let mut fsm = StateMachine::builder(Status::Idle)
            .on(Status::Idle, Signal::Submit, Status::Pending)
            .on(Status::Pending, Signal::Failed, Status::Idle)
            .on_enter(Status::Pending, move || entered_clone.set(entered_clone.get() + 1))
            .on_exit(Status::Pending, move || exited_clone.set(exited_clone.get() + 1))
            .build();

        fsm.send(Signal::Submit);
        assert_eq!((entered.get(), exited.get()), (1, 0));

        fsm.send(Signal::Failed);
        assert_eq!((entered.get(), exited.get()), (1, 1));

        fsm.send(Signal::Submit);
        assert_eq!(entered.get(), 2);
    }

    #[test]
    fn test_transition_actions_and_history() {
        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();

        let mut fsm = StateMachine::builder(Status::Idle)
            .transition(
                Transition::new(Status::Idle, Signal::Submit, Status::Pending)
                    .with_action(move || fired_clone.set(true)),
            )
            .on(Status::Pending, Signal::Ok, Status::Success)
            .build();

        fsm.send(Signal::Submit);
        fsm.send(Signal::Ok);

        assert!(fired.get());
        assert_eq!(
            fsm.history(),
            &[
                (Status::Idle, Signal::Submit, Status::Pending),
                (Status::Pending, Signal::Ok, Status::Success),
            ]
        );

        fsm.clear_history();
        assert!(fsm.history().is_empty());
    }
}
