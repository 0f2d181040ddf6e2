pub mod common;
pub mod lifecycle;
pub mod perception;

use crate::lifecycle::LifecycleNode;
use crate::perception::PerceptionStack;

/// Core of the tracking pipeline: owns components and drives their lifecycle
pub struct TrackerCore {
    components: Vec<Box<dyn LifecycleNode>>,
}

impl TrackerCore {
    /// Create a new, empty core
    pub fn new() -> Self {
        TrackerCore {
            components: Vec::new(),
        }
    }

    /// Register a component with the core
    pub fn register<T: LifecycleNode + 'static>(&mut self, component: T) {
        self.components.push(Box::new(component));
    }

    /// Configure and activate all registered components
    pub fn init(&mut self) -> Result<(), String> {
        for component in &mut self.components {
            component.on_configure()?;
            component.on_activate()?;
        }
        Ok(())
    }

    /// Deactivate and clean up all registered components
    pub fn shutdown(&mut self) -> Result<(), String> {
        for component in &mut self.components {
            component.on_deactivate()?;
            component.on_cleanup()?;
        }
        Ok(())
    }

    /// Get a mutable reference to the registered perception stack
    pub fn perception_stack_mut(&mut self) -> Option<&mut PerceptionStack> {
        self.components
            .iter_mut()
            .find_map(|component| component.as_any_mut().downcast_mut::<PerceptionStack>())
    }
}

impl Default for TrackerCore {
    fn default() -> Self {
        Self::new()
    }
}
