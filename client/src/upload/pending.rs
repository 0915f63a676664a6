use log::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Tag,
    Method,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubresourceKind {
    Layer,
    Fragment,
    Curve,
    Buffer,
}

/// Kind of creation request currently awaiting acknowledgment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pending {
    None,
    Connect,
    EntityCreate,
    GroupCreate(GroupKind),
    SubresourceCreate(SubresourceKind),
}

/// Single-slot state machine serializing outstanding creation requests.
///
/// Only one kind of request is in flight at a time, so an acknowledgment's
/// meaning is inferred from the active state. `count` is the number of
/// acknowledgments still owed for a batch; non-batched requests leave it at
/// zero and the first `complete()` releases them.
#[derive(Debug)]
pub struct PendingTracker {
    state: Pending,
    count: usize,
}

impl Default for PendingTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingTracker {
    pub fn new() -> Self {
        Self {
            state: Pending::None,
            count: 0,
        }
    }

    pub fn state(&self) -> Pending {
        self.state
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_idle(&self) -> bool {
        self.state == Pending::None
    }

    pub fn is_awaiting(&self, kind: Pending) -> bool {
        kind != Pending::None && self.state == kind
    }

    /// Record that a request of `kind` was sent. Switching kinds discards any
    /// count left over from the previous one.
    pub fn begin(&mut self, kind: Pending, counts: bool) {
        if kind != self.state {
            self.count = 0;
        }
        self.state = kind;
        if counts {
            self.count += 1;
        }
        trace!("pending {:?}, count={}", self.state, self.count);
    }

    /// Record one acknowledgment for the active state.
    pub fn complete(&mut self) {
        if self.count > 0 {
            self.count -= 1;
            if self.count > 0 {
                trace!("pending {:?}, count={}", self.state, self.count);
                return;
            }
        }
        trace!("pending {:?} resolved", self.state);
        self.state = Pending::None;
    }
}
