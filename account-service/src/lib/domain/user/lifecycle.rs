use chrono::DateTime;
use chrono::Utc;

/// Activation state of a record.
///
/// `Deleted` is absorbing: once a record is soft-deleted no transition
/// brings it back, and it disappears from every lookup the service
/// performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Active,
    Inactive,
    Deleted,
}

impl LifecycleState {
    /// Reactivate a previously inactive record.
    pub fn activate(self) -> Self {
        match self {
            Self::Deleted => Self::Deleted,
            _ => Self::Active,
        }
    }

    /// Mark the record as inactive without deleting it.
    pub fn inactivate(self) -> Self {
        match self {
            Self::Deleted => Self::Deleted,
            _ => Self::Inactive,
        }
    }

    /// Soft-delete the record.
    pub fn delete(self) -> Self {
        Self::Deleted
    }

    /// Reconstruct a state from the persisted flag pair.
    pub fn from_flags(is_active: bool, is_deleted: bool) -> Self {
        if is_deleted {
            Self::Deleted
        } else if is_active {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// Flag pair `(is_active, is_deleted)` for persistence.
    pub fn as_flags(self) -> (bool, bool) {
        match self {
            Self::Active => (true, false),
            Self::Inactive => (false, false),
            Self::Deleted => (false, true),
        }
    }
}

/// Lifecycle bookkeeping shared by soft-deletable entities.
///
/// Value-level replacement for mutable activate/inactivate/delete
/// methods: every transition returns a new value with `last_modified`
/// stamped, and entities embed it as a plain field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    pub state: LifecycleState,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl Lifecycle {
    /// Fresh lifecycle for a newly created record: active, both
    /// timestamps set to `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            state: LifecycleState::Active,
            created_at: now,
            last_modified: now,
        }
    }

    /// Rebuild from persisted columns.
    pub fn from_parts(
        is_active: bool,
        is_deleted: bool,
        created_at: DateTime<Utc>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            state: LifecycleState::from_flags(is_active, is_deleted),
            created_at,
            last_modified,
        }
    }

    pub fn activate(self, now: DateTime<Utc>) -> Self {
        self.transition(self.state.activate(), now)
    }

    pub fn inactivate(self, now: DateTime<Utc>) -> Self {
        self.transition(self.state.inactivate(), now)
    }

    pub fn delete(self, now: DateTime<Utc>) -> Self {
        self.transition(self.state.delete(), now)
    }

    /// Stamp `last_modified` without changing state.
    pub fn touch(self, now: DateTime<Utc>) -> Self {
        Self {
            last_modified: now,
            ..self
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == LifecycleState::Active
    }

    pub fn is_deleted(&self) -> bool {
        self.state == LifecycleState::Deleted
    }

    fn transition(self, state: LifecycleState, now: DateTime<Utc>) -> Self {
        Self {
            state,
            last_modified: now,
            ..self
        }
    }
}
