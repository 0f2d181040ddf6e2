//! Lifecycle management for tracking components
//!
//! A component starts `Unconfigured`. Configuring sizes its sample windows
//! and leaves it `Inactive`; only an `Active` component takes samples from the
//! producer. Deactivating pauses intake with history intact, and cleanup
//! discards the history and returns the component to `Unconfigured`.

use log::debug;
use std::any::Any;

/// Trait for components driven through the configure/activate/deactivate/cleanup cycle
pub trait LifecycleNode: Send + Sync {
    /// Size sample windows from the current configuration (Unconfigured or Inactive -> Inactive)
    fn on_configure(&mut self) -> Result<(), String>;

    /// Start taking samples (Inactive -> Active)
    fn on_activate(&mut self) -> Result<(), String>;

    /// Stop taking samples, keeping the windows filled (Active -> Inactive)
    fn on_deactivate(&mut self) -> Result<(), String>;

    /// Discard buffered samples (any -> Unconfigured)
    fn on_cleanup(&mut self) -> Result<(), String>;

    /// Convert to Any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// State of a tracking component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Unconfigured,
    Inactive,
    Active,
}

/// Name and state bookkeeping shared by tracking components
pub struct LifecycleNodeBase {
    pub name: String,
    state: State,
}

impl LifecycleNodeBase {
    pub fn new(name: &str) -> Self {
        LifecycleNodeBase {
            name: name.to_string(),
            state: State::Unconfigured,
        }
    }

    pub fn get_state(&self) -> State {
        self.state
    }

    /// Whether the component currently accepts samples
    pub fn is_active(&self) -> bool {
        self.state == State::Active
    }

    /// Move to `to` if the current state is one of `from`
    pub fn transition(&mut self, from: &[State], to: State) -> Result<(), String> {
        if !from.contains(&self.state) {
            return Err(format!(
                "{}: cannot move from {:?} to {:?}",
                self.name, self.state, to
            ));
        }
        self.set_state(to);
        Ok(())
    }

    /// Set the state unconditionally
    pub fn set_state(&mut self, state: State) {
        debug!("{}: {:?} -> {:?}", self.name, self.state, state);
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_checks_source_state() {
        let mut base = LifecycleNodeBase::new("gyro");
        assert!(base.transition(&[State::Inactive], State::Active).is_err());
        assert_eq!(base.get_state(), State::Unconfigured);

        base.transition(&[State::Unconfigured], State::Inactive).unwrap();
        base.transition(&[State::Inactive], State::Active).unwrap();
        assert!(base.is_active());
    }
}
