use std::cell::Cell;
use std::rc::Rc;

/// Per-view request generation.
///
/// Each fetch takes a ticket; only the newest ticket may publish its result.
/// Re-fetching for a new route parameter or tearing the view down bumps the
/// generation, so a response that arrives late is dropped instead of landing
/// on the wrong (or a disposed) view. Single-threaded: the browser event loop
/// is the only executor.
#[derive(Clone, Debug, Default)]
pub struct FetchGeneration {
    current: Rc<Cell<u64>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersedes every outstanding ticket.
    pub fn begin(&self) -> FetchTicket {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        FetchTicket(next)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.current.get() == ticket.0
    }

    /// Called on unmount; nothing issued before this may publish.
    pub fn invalidate(&self) {
        self.current.set(self.current.get().wrapping_add(1));
    }

    /// Runs `publish` only when `ticket` is still current.
    pub fn settle<T>(&self, ticket: FetchTicket, value: T, publish: impl FnOnce(T)) -> bool {
        if self.is_current(ticket) {
            publish(value);
            true
        } else {
            false
        }
    }
}
