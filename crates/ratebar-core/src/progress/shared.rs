//! Bar shared between a producer and a display loop.

use std::sync::{Arc, Mutex, MutexGuard};

use super::Bar;
use crate::terminal::{self, TerminalSize};

/// Cheaply clonable handle to one `Bar` behind a mutex.
///
/// A poisoned lock is taken over rather than propagated: the bar holds plain
/// counters and is always in a renderable state.
#[derive(Debug, Clone)]
pub struct SharedBar {
    inner: Arc<Mutex<Bar>>,
}

impl SharedBar {
    pub fn new(bar: Bar) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bar)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Bar> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set(&self, value: i64) {
        self.lock().set(value);
    }

    pub fn is_stopped(&self) -> bool {
        self.lock().is_stopped()
    }

    pub fn render(&self, width: usize) -> String {
        self.lock().render(width)
    }

    /// Render at the terminal's width, or `fallback` columns if it can't be queried.
    pub fn render_for(&self, term: &dyn TerminalSize, fallback: usize) -> String {
        let width = terminal::width_or(term, fallback);
        self.render(width)
    }

    /// Run `f` with read access to the bar.
    pub fn with<R>(&self, f: impl FnOnce(&Bar) -> R) -> R {
        f(&self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::FixedWidth;
    use std::thread;

    #[test]
    fn producer_thread_updates_are_visible_to_renderer() {
        let shared = SharedBar::new(Bar::new("copy", 1000, 0));
        let producer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for v in (0..=1000).step_by(100) {
                    shared.set(v);
                }
            })
        };
        producer.join().unwrap();

        assert!(shared.is_stopped());
        assert_eq!(shared.with(|b| b.current()), 1000);
        let line = shared.render_for(&FixedWidth(100), 80);
        assert_eq!(line.chars().count(), 99);
    }
}
