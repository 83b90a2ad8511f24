use tracing::trace;

type Observer = Box<dyn FnMut(f64)>;

/// A bounded value that notifies subscribers whenever it changes.
///
/// Subscribers run synchronously, in registration order, inside [`Slider::set_val`].
pub struct Slider {
    label: String,
    min: f64,
    max: f64,
    val: f64,
    observers: Vec<Observer>,
}

impl Slider {
    /// `valinit` is clamped into `[min, max]`.
    pub fn new(label: impl Into<String>, min: f64, max: f64, valinit: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            label: label.into(),
            min,
            max,
            val: valinit.clamp(min, max),
            observers: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn val(&self) -> f64 {
        self.val
    }

    /// Registers `callback` and returns its subscription id.
    pub fn on_changed(&mut self, callback: impl FnMut(f64) + 'static) -> usize {
        self.observers.push(Box::new(callback));
        self.observers.len() - 1
    }

    /// Moves the slider, clamping into range, and notifies every subscriber
    /// with the value actually taken. Returns that value.
    pub fn set_val(&mut self, value: f64) -> f64 {
        let value = if value.is_nan() { self.val } else { value.clamp(self.min, self.max) };
        self.val = value;
        trace!(slider = %self.label, value, "Slider changed");

        for observer in &mut self.observers {
            observer(value);
        }
        value
    }
}

impl std::fmt::Debug for Slider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("label", &self.label)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("val", &self.val)
            .field("observers", &self.observers.len())
            .finish()
    }
}
