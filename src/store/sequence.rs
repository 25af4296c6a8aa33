use std::fmt;

/// Remote collections mirrored by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Cars,
    Reservations,
    Stats,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Cars => f.write_str("cars"),
            Collection::Reservations => f.write_str("reservations"),
            Collection::Stats => f.write_str("stats"),
        }
    }
}

/// Issued before a fetch goes out; the response is applied only if its
/// ticket is newer than the last one applied for the same collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub collection: Collection,
    pub seq: u64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Counter {
    issued: u64,
    applied: u64,
}

#[derive(Debug, Default)]
pub struct SequenceBook {
    cars: Counter,
    reservations: Counter,
    stats: Counter,
}

impl SequenceBook {
    fn counter(&mut self, collection: Collection) -> &mut Counter {
        match collection {
            Collection::Cars => &mut self.cars,
            Collection::Reservations => &mut self.reservations,
            Collection::Stats => &mut self.stats,
        }
    }

    pub fn issue(&mut self, collection: Collection) -> Ticket {
        let counter = self.counter(collection);
        counter.issued += 1;
        Ticket { collection, seq: counter.issued }
    }

    /// Records `ticket` as applied if it is the newest seen so far.
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        let counter = self.counter(ticket.collection);
        if ticket.seq > counter.applied {
            counter.applied = ticket.seq;
            true
        } else {
            false
        }
    }
}
