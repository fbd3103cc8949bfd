//! # Request Sequencing
//!
//! Last-request-wins bookkeeping for a single list view.
//!
//! ```text
//!   issue() → #1 ───────────────────────────────► resolves: stale, dropped
//!   issue() → #2 ─────────► resolves: current, applied
//!
//!   is_current(#n) ⇔ n is the latest number issued
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Proof of which request a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn number(&self) -> u64 {
        self.0
    }
}

/// Hands out strictly increasing tickets.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every earlier ticket.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no request was issued after `ticket`.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Number of requests issued so far.
    pub fn issued(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_ticket_supersedes_earlier() {
        let sequencer = RequestSequencer::new();
        let a = sequencer.issue();
        assert!(sequencer.is_current(a));

        let b = sequencer.issue();
        assert!(b > a);
        assert!(!sequencer.is_current(a));
        assert!(sequencer.is_current(b));
        assert_eq!(sequencer.issued(), 2);
    }

    #[test]
    fn test_tickets_are_unique_across_threads() {
        let sequencer = std::sync::Arc::new(RequestSequencer::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sequencer = sequencer.clone();
                std::thread::spawn(move || {
                    (0..100).map(|_| sequencer.issue().number()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 400);
    }
}
