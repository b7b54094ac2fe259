use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// A zero-argument completion callback.
pub type Hook = Box<dyn FnMut()>;

/// Host timer capability: run `task` once after `delay`.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// Shared flag through which a deferred task asks a ribbon to disappear.
///
/// The owning path polls it at the start of every update.
#[derive(Debug, Clone, Default)]
pub struct DisappearTrigger(Rc<Cell<bool>>);

impl DisappearTrigger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the disappear countdown.
    pub fn fire(&self) {
        self.0.set(true);
    }

    /// Returns and clears a pending request.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

/// Callbacks fired synchronously from `RibbonPath::update`.
#[derive(Default)]
pub(crate) struct Hooks {
    pub(crate) on_auto_draw_end: Option<Hook>,
    pub(crate) on_disappear: Option<Hook>,
}

impl Hooks {
    pub(crate) fn auto_draw_ended(&mut self) {
        if let Some(hook) = self.on_auto_draw_end.as_mut() {
            hook();
        }
    }

    pub(crate) fn disappeared(&mut self) {
        if let Some(hook) = self.on_disappear.as_mut() {
            hook();
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_auto_draw_end", &self.on_auto_draw_end.is_some())
            .field("on_disappear", &self.on_disappear.is_some())
            .finish()
    }
}
