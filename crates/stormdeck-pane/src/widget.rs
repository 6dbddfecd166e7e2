//! The pane adapter: one configuration slot, one animation engine.

use std::sync::Arc;

use stormdeck_core::{PaneId, Size, SlotIndex};
use stormdeck_store::SlotView;

use crate::config::{AnimationConfig, ConfigOutcome, resolve_config};
use crate::engine::{AnimationEngine, EngineFactory};
use crate::measure::{MeasuredElement, Measurement};

/// What a draw pass needs to know about a pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState<'a> {
    pub container_id: &'a str,
    pub config: Option<&'a AnimationConfig>,
    pub has_engine: bool,
    pub slider_vertical: bool,
}

/// Embedded animation surface bound to a single configuration slot.
///
/// Engines are built in the configuration handler, so [`PaneWidget::render`]
/// never has side effects.
pub struct PaneWidget {
    pane_id: PaneId,
    container_id: String,
    slot: SlotView,
    factory: Arc<dyn EngineFactory>,
    engine: Option<Box<dyn AnimationEngine>>,
    config: Option<AnimationConfig>,
    element: MeasuredElement,
    mounted: bool,
    slider_vertical: bool,
}

impl PaneWidget {
    pub fn new(pane_id: PaneId, slot: SlotView, factory: Arc<dyn EngineFactory>) -> Self {
        let container_id = pane_id.container_element_id();
        Self {
            pane_id,
            container_id,
            slot,
            factory,
            engine: None,
            config: None,
            element: MeasuredElement::new(),
            mounted: false,
            slider_vertical: false,
        }
    }

    /// Start observing the container and apply whatever the slot holds.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.element.reset();
        self.slot.take_changed();

        let raw = self.slot.read();
        self.on_config(raw.as_deref());
        tracing::debug!(pane = %self.pane_id, slot = %self.slot.slot(), "pane mounted");
    }

    /// Container resize callback. Returns whether the engine was refreshed.
    ///
    /// The first callback after mount only records the initial layout.
    pub fn on_resize(&mut self, size: Size<u32>) -> bool {
        if !self.mounted {
            return false;
        }
        match self.element.observe(size) {
            Measurement::Primed => {
                tracing::trace!(pane = %self.pane_id, %size, "initial measurement");
                false
            }
            Measurement::Unchanged => false,
            Measurement::Changed => match self.engine.as_mut() {
                Some(engine) => {
                    engine.refresh_extents(size);
                    tracing::trace!(pane = %self.pane_id, %size, "engine refreshed");
                    true
                }
                None => false,
            },
        }
    }

    /// Apply a new raw configuration. Returns whether a new engine was built.
    ///
    /// Anything short of a complete configuration leaves the current engine
    /// in place.
    pub fn on_config(&mut self, raw: Option<&str>) -> bool {
        match resolve_config(raw, &self.container_id) {
            ConfigOutcome::Ready(config) => {
                self.replace_engine(config);
                true
            }
            ConfigOutcome::Malformed(err) => {
                tracing::warn!(pane = %self.pane_id, error = %err, "ignoring malformed configuration");
                false
            }
            ConfigOutcome::Placeholder => {
                tracing::trace!(pane = %self.pane_id, "configuration has no time yet");
                false
            }
            ConfigOutcome::Inert => false,
        }
    }

    /// Pull a pending slot change, if any.
    pub fn sync(&mut self) -> bool {
        if !self.mounted || !self.slot.take_changed() {
            return false;
        }
        let raw = self.slot.read();
        self.on_config(raw.as_deref())
    }

    pub fn render(&self) -> RenderState<'_> {
        RenderState {
            container_id: &self.container_id,
            config: self.config.as_ref(),
            has_engine: self.engine.is_some(),
            slider_vertical: self.slider_vertical,
        }
    }

    /// Tear down the engine. The widget can be mounted again afterwards.
    pub fn destroy(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.destroy();
        }
        self.mounted = false;
        tracing::debug!(pane = %self.pane_id, "pane destroyed");
    }

    /// Orient the time slider. Returns whether the orientation changed.
    ///
    /// A live engine is rebuilt from the current configuration with the new
    /// orientation, since engines take it only at construction.
    pub fn set_slider_vertical(&mut self, vertical: bool) -> bool {
        if self.slider_vertical == vertical {
            return false;
        }
        self.slider_vertical = vertical;
        if let Some(config) = self.config.clone() {
            self.replace_engine(config);
        }
        true
    }

    pub fn pane_id(&self) -> &PaneId {
        &self.pane_id
    }

    pub fn slot(&self) -> SlotIndex {
        self.slot.slot()
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn config(&self) -> Option<&AnimationConfig> {
        self.config.as_ref()
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_slider_vertical(&self) -> bool {
        self.slider_vertical
    }

    fn replace_engine(&mut self, mut config: AnimationConfig) {
        config.time_slider_vertical = self.slider_vertical;
        if let Some(mut previous) = self.engine.take() {
            previous.destroy();
        }
        let mut engine = self.factory.build(&config);
        engine.create();
        tracing::debug!(pane = %self.pane_id, "animation engine created");

        self.engine = Some(engine);
        self.config = Some(config);
    }
}

impl Drop for PaneWidget {
    fn drop(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.destroy();
        }
    }
}
