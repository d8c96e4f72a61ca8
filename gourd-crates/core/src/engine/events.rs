use enumset::enum_set;
use enumset::EnumSet;
use enumset::EnumSetType;

/// The result of a domain narrowing operation.
///
/// The variants are ordered by strength, i.e. an assignment is also a bound change which is also
/// a domain change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModEvent {
    /// The operation would have emptied the domain; the space is now failed.
    Failed,
    /// The domain did not change.
    None,
    /// A value strictly between the bounds was removed.
    Domain,
    /// The bounds changed, but the variable is not assigned.
    Bounds,
    /// The variable became assigned.
    Assigned,
}

impl ModEvent {
    pub fn is_failed(self) -> bool {
        self == ModEvent::Failed
    }

    /// Whether the domain was narrowed (without failing).
    pub fn is_modified(self) -> bool {
        matches!(self, ModEvent::Domain | ModEvent::Bounds | ModEvent::Assigned)
    }

    /// The stronger of two events, as observed by a subscriber which sees both.
    pub fn strongest(self, other: ModEvent) -> ModEvent {
        fn strength(event: ModEvent) -> u8 {
            match event {
                ModEvent::None => 0,
                ModEvent::Domain => 1,
                ModEvent::Bounds => 2,
                ModEvent::Assigned => 3,
                ModEvent::Failed => 4,
            }
        }
        if strength(other) > strength(self) {
            other
        } else {
            self
        }
    }

    pub(crate) fn domain_event(self) -> Option<DomainEvent> {
        match self {
            ModEvent::Failed | ModEvent::None => None,
            ModEvent::Domain => Some(DomainEvent::Removal),
            ModEvent::Bounds => Some(DomainEvent::Bounds),
            ModEvent::Assigned => Some(DomainEvent::Assign),
        }
    }
}

/// The kinds of domain changes a propagator can subscribe to.
#[derive(Debug, EnumSetType, Hash)]
pub enum DomainEvent {
    Assign,
    Bounds,
    Removal,
}

/// The set of [`DomainEvent`]s which schedule a propagator for a particular variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DomainEvents {
    events: EnumSet<DomainEvent>,
}

impl DomainEvents {
    /// Schedule when the variable becomes assigned.
    pub const VALUE: DomainEvents = DomainEvents {
        events: enum_set!(DomainEvent::Assign),
    };
    /// Schedule when a bound of the variable changes.
    pub const BOUNDS: DomainEvents = DomainEvents {
        events: enum_set!(DomainEvent::Assign | DomainEvent::Bounds),
    };
    /// Schedule on any change of the domain.
    pub const DOMAIN: DomainEvents = DomainEvents {
        events: enum_set!(DomainEvent::Assign | DomainEvent::Bounds | DomainEvent::Removal),
    };

    pub(crate) fn is_triggered_by(self, event: ModEvent) -> bool {
        event
            .domain_event()
            .is_some_and(|domain_event| self.events.contains(domain_event))
    }
}
