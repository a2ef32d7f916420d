//! Completion handle for `push` / `replace`

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

type Deferred = Pin<Box<dyn Future<Output = bool> + Send>>;

enum State {
    Settled(bool),
    Deferred(Deferred),
}

/// Resolves to `true` once the navigation is committed
///
/// In synchronous mode the navigation is already committed when the
/// `Transition` is returned. In async mode the commit happens one tick later
/// on the current tokio runtime; outside a runtime it happens when the
/// transition is polled or on [`MemoryRouter::flush`](crate::MemoryRouter::flush).
/// Resolves to `false` when [`MemoryRouter::reset`](crate::MemoryRouter::reset)
/// discarded the navigation before it committed.
#[must_use = "await the transition to observe when the navigation commits"]
pub struct Transition {
    state: State,
}

impl Transition {
    pub(crate) fn settled(result: bool) -> Self {
        Self {
            state: State::Settled(result),
        }
    }

    pub(crate) fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = bool> + Send + 'static,
    {
        Self {
            state: State::Deferred(Box::pin(future)),
        }
    }

    /// Whether the navigation was committed before this handle was returned
    pub fn is_settled(&self) -> bool {
        matches!(self.state, State::Settled(_))
    }
}

impl Future for Transition {
    type Output = bool;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        let this = self.get_mut();
        match &mut this.state {
            State::Settled(result) => Poll::Ready(*result),
            State::Deferred(future) => match future.as_mut().poll(cx) {
                Poll::Ready(result) => {
                    this.state = State::Settled(result);
                    Poll::Ready(result)
                }
                Poll::Pending => Poll::Pending,
            },
        }
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("settled", &self.is_settled())
            .finish()
    }
}
