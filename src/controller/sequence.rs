use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        self.latest = self.latest.saturating_add(1);
        Ticket(self.latest)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    pub fn latest(&self) -> Option<Ticket> {
        (self.latest > 0).then_some(Ticket(self.latest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_increase() {
        let mut seq = RequestSequence::new();
        let a = seq.issue();
        let b = seq.issue();
        assert!(b > a);
        assert_eq!(seq.latest(), Some(b));
    }

    #[test]
    fn only_the_newest_ticket_is_latest() {
        let mut seq = RequestSequence::new();
        let a = seq.issue();
        assert!(seq.is_latest(a));
        let b = seq.issue();
        assert!(!seq.is_latest(a));
        assert!(seq.is_latest(b));
    }

    #[test]
    fn ticket_values_count_issued_requests() {
        let mut seq = RequestSequence::new();
        seq.issue();
        seq.issue();
        assert_eq!(seq.issue().value(), 3);
        assert_eq!(seq.latest().map(Ticket::value), Some(3));
    }

    #[test]
    fn fresh_sequence_has_no_latest() {
        assert_eq!(RequestSequence::new().latest(), None);
    }
}
