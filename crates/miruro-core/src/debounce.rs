//! Generation-counted debouncing.
//!
//! The debouncer never owns a timer. The caller schedules a value, waits
//! `window()` on whatever clock it likes (an async sleep in the GUI, nothing
//! at all in tests) and then presents the ticket back. Only the newest
//! ticket can release the value, so a burst of keystrokes collapses into a
//! single action carrying the last input.

use std::time::Duration;

/// Handle returned by [`Debouncer::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    generation: u64,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            pending: None,
        }
    }

    /// Idle interval to wait before presenting a ticket.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace the pending value. Every previously issued ticket goes stale.
    pub fn schedule(&mut self, value: T) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(value);
        Ticket(self.generation)
    }

    /// Release the pending value if `ticket` is the newest one.
    ///
    /// A ticket releases at most once.
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Drop the pending value; outstanding tickets become no-ops.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> Debouncer<String> {
        Debouncer::new(Duration::from_millis(100))
    }

    #[test]
    fn test_single_schedule_fires_once() {
        let mut d = debouncer();
        let t = d.schedule("naruto".into());
        assert_eq!(d.fire(t).as_deref(), Some("naruto"));
        assert_eq!(d.fire(t), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_burst_collapses_to_last_value() {
        let mut d = debouncer();
        let tickets: Vec<Ticket> = ["n", "na", "nar", "naru"]
            .iter()
            .map(|s| d.schedule(s.to_string()))
            .collect();

        let fired: Vec<String> = tickets.into_iter().filter_map(|t| d.fire(t)).collect();
        assert_eq!(fired, vec!["naru".to_string()]);
    }

    #[test]
    fn test_stale_ticket_after_newer_fire() {
        let mut d = debouncer();
        let old = d.schedule("a".into());
        let new = d.schedule("ab".into());
        assert_eq!(d.fire(new).as_deref(), Some("ab"));
        assert_eq!(d.fire(old), None);
    }

    #[test]
    fn test_cancel_invalidates_ticket() {
        let mut d = debouncer();
        let t = d.schedule("bleach".into());
        d.cancel();
        assert_eq!(d.fire(t), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_window_is_reported() {
        assert_eq!(debouncer().window(), Duration::from_millis(100));
    }
}
