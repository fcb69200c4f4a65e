//! Track bar widget - horizontal slider over a numeric range

use crate::foundation::math::{Vec2, Vec4};
use crate::render::Batch2D;
use crate::ui::node::{ClickEvent, NodeBase, UiNode};

/// Default track bar height
pub const TRACKBAR_HEIGHT: f32 = 26.0;

/// Slider selecting a value in `[min, max]` snapped to `step`
pub struct TrackBar {
    base: NodeBase,
    min: f64,
    max: f64,
    value: f64,
    step: f64,
    track_width: u32,
    /// Color of the thumb
    pub track_color: Vec4,
    supplier: Option<Box<dyn Fn() -> f64>>,
    consumer: Option<Box<dyn FnMut(f64)>>,
}

impl TrackBar {
    /// Track bar with a thumb `track_width` steps wide
    pub fn new(min: f64, max: f64, value: f64, step: f64, track_width: u32) -> Self {
        let mut base = NodeBase::new(Vec2::new(TRACKBAR_HEIGHT, TRACKBAR_HEIGHT));
        base.color = Vec4::new(0.0, 0.0, 0.0, 0.4);
        base.hover_color = Vec4::new(0.01, 0.02, 0.03, 0.5);
        Self {
            base,
            min,
            max,
            value,
            step,
            track_width: track_width.max(1),
            track_color: Vec4::new(1.0, 1.0, 1.0, 0.4),
            supplier: None,
            consumer: None,
        }
    }

    /// Current value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Set value without notifying the consumer
    pub fn set_value(&mut self, value: f64) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Lower bound
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Mirror `supplier` every frame
    pub fn supplier(&mut self, supplier: impl Fn() -> f64 + 'static) {
        self.supplier = Some(Box::new(supplier));
    }

    /// Receive values chosen by dragging
    pub fn consumer(&mut self, consumer: impl FnMut(f64) + 'static) {
        self.consumer = Some(Box::new(consumer));
    }

    fn span(&self) -> f64 {
        self.max - self.min + f64::from(self.track_width) * self.step
    }

    fn pick(&mut self, local_x: f32) {
        let width = f64::from(self.base.size.x);
        if width <= 0.0 {
            return;
        }
        let raw = f64::from(local_x) / width * self.span() + self.min;
        let mut value = raw.clamp(self.min, self.max);
        if self.step > 0.0 {
            value = ((value - self.min) / self.step).floor() * self.step + self.min;
        }
        self.value = value;
        if let Some(consumer) = &mut self.consumer {
            consumer(value);
        }
    }
}

impl UiNode for TrackBar {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn act(&mut self, _delta: f32) {
        if self.base.pressed {
            return;
        }
        if let Some(supplier) = &self.supplier {
            self.value = supplier();
        }
    }

    fn clicked(&mut self, event: &ClickEvent) {
        self.pick(event.local.x);
    }

    fn mouse_move(&mut self, local: Vec2) {
        self.pick(local.x);
    }

    fn draw(&self, pos: Vec2, batch: &mut Batch2D) {
        let color = if self.base.hover { self.base.hover_color } else { self.base.color };
        batch.set_color(color);
        batch.rect(pos, self.base.size);

        let span = self.span();
        if span <= 0.0 {
            return;
        }
        let width = f64::from(self.base.size.x);
        let t = (self.value - self.min) / span;
        let thumb = width * (f64::from(self.track_width) / span * self.step);
        batch.set_color(self.track_color);
        batch.rect(
            Vec2::new(pos.x + (width * t) as f32, pos.y),
            Vec2::new(thumb as f32, self.base.size.y),
        );
    }
}
