//! Seams to the external animation engine.

use stormdeck_core::Size;

use crate::config::AnimationConfig;

/// One running weather animation.
///
/// Instances are never reconfigured: a new configuration always means a new
/// instance, and the old one is destroyed explicitly.
pub trait AnimationEngine: Send {
    /// Build the animation's visuals inside its container.
    fn create(&mut self);

    /// Re-measure after the container changed size.
    fn refresh_extents(&mut self, size: Size<u32>);

    /// Release everything the animation holds.
    fn destroy(&mut self);
}

/// Builds engine instances from resolved configurations.
pub trait EngineFactory: Send + Sync {
    fn build(&self, config: &AnimationConfig) -> Box<dyn AnimationEngine>;
}

impl<F> EngineFactory for F
where
    F: Fn(&AnimationConfig) -> Box<dyn AnimationEngine> + Send + Sync,
{
    fn build(&self, config: &AnimationConfig) -> Box<dyn AnimationEngine> {
        self(config)
    }
}
