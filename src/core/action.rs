// Author: Dustin Pilgrim
// License: MIT

/// Follow-up work the tracker cannot do itself because it needs a provider.
///
/// The daemon runs each one off the event loop and feeds the answer back in
/// as a regular [`Event`](crate::core::events::Event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Ask the connectivity provider which connection carries the default route.
    QueryNetwork,

    /// Ask the idle provider how long the session has been idle.
    QueryIdleTime,
}
