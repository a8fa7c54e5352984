//! Callback seam between the decode loop and the caller.

use crate::error::StreamError;
use crate::sse::StreamEvent;

/// Receives the outcome of one streamed exchange.
///
/// `on_event` fires once per decoded record, in arrival order, before the
/// loop reads further bytes. `on_complete` fires exactly once, either on a
/// `done: true` record or at natural end-of-stream. `on_error` fires at most
/// once, and never after `on_complete`. Cancellation fires neither.
pub trait StreamHandler: Send {
    /// A record was decoded.
    fn on_event(&mut self, event: StreamEvent);

    /// The stream failed; no further callbacks follow.
    fn on_error(&mut self, error: StreamError) {
        let _ = error;
    }

    /// The stream finished; no further callbacks follow.
    fn on_complete(&mut self) {}
}

/// Handler that funnels every callback into closures. Convenient for tests
/// and small call sites that do not want a dedicated type.
pub struct FnHandler<E, R, C>
where
    E: FnMut(StreamEvent) + Send,
    R: FnMut(StreamError) + Send,
    C: FnMut() + Send,
{
    on_event: E,
    on_error: R,
    on_complete: C,
}

impl<E, R, C> FnHandler<E, R, C>
where
    E: FnMut(StreamEvent) + Send,
    R: FnMut(StreamError) + Send,
    C: FnMut() + Send,
{
    pub fn new(on_event: E, on_error: R, on_complete: C) -> Self {
        Self {
            on_event,
            on_error,
            on_complete,
        }
    }
}

impl<E, R, C> StreamHandler for FnHandler<E, R, C>
where
    E: FnMut(StreamEvent) + Send,
    R: FnMut(StreamError) + Send,
    C: FnMut() + Send,
{
    fn on_event(&mut self, event: StreamEvent) {
        (self.on_event)(event)
    }

    fn on_error(&mut self, error: StreamError) {
        (self.on_error)(error)
    }

    fn on_complete(&mut self) {
        (self.on_complete)()
    }
}
