pub(crate) mod domains;
mod events;
mod propagator_queue;
mod space;
mod state;
mod variable_store;
pub(crate) mod variables;
mod watch_lists;

pub use domains::FloatDomain;
pub use domains::IntDomain;
pub use domains::SetDomain;
pub use events::DomainEvent;
pub use events::DomainEvents;
pub use events::ModEvent;
pub use propagator_queue::SchedulingPolicy;
pub use space::Maximise;
pub use space::Minimise;
pub use space::Objective;
pub use space::Space;
pub use space::SpaceStatus;
pub(crate) use state::State;
pub use variable_store::VariableStore;
pub use watch_lists::WatchLists;
