use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::debug;

use crate::surface::{CatalogSurface, OrderButtonState};

pub const CONFIRMATION_DELAY: Duration = Duration::from_secs(2);

/// Temporary "added" state on catalog order buttons.
///
/// Each card has at most one pending restore. A new confirmation on the same
/// card replaces the old timer, and dropping the `FeedbackTimer` aborts every
/// pending restore so nothing touches the surface after teardown.
pub struct FeedbackTimer {
    delay: Duration,
    pending: HashMap<usize, JoinHandle<()>>,
}

impl Default for FeedbackTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackTimer {
    pub fn new() -> Self {
        Self::with_delay(CONFIRMATION_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn confirm(&mut self, card: usize, surface: Arc<dyn CatalogSurface>) {
        self.pending.retain(|_, handle| !handle.is_finished());
        self.cancel(card);

        surface.set_order_button(card, OrderButtonState::Confirmed);
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            surface.set_order_button(card, OrderButtonState::Ready);
        });
        self.pending.insert(card, handle);
    }

    /// Drops the pending restore for `card`, leaving the button as it is.
    pub fn cancel(&mut self, card: usize) -> bool {
        match self.pending.remove(&card) {
            Some(handle) => {
                handle.abort();
                debug!(card, "order button feedback cancelled");
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }

    /// True while `card` shows the confirmation and its button is disabled.
    pub fn is_confirming(&self, card: usize) -> bool {
        self.pending
            .get(&card)
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn pending(&self) -> usize {
        self.pending
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl Drop for FeedbackTimer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
#[path = "tests/feedback_tests.rs"]
mod tests;
