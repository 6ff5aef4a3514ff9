//! Built-in routing policies.
//!
//! All policies implement [`RoutePolicy`](crate::policy::RoutePolicy) and
//! are interchangeable behind the shared contract:
//!
//! - [`SwapRouter`]: plain swap-chain routing, the baseline.
//! - [`BridgeRouter`]: swap chains with a bridge substitution across the
//!   final two hops.
//! - [`PinnedBridgeRouter`]: bridge routing that detours around a
//!   configured set of immovable sites.

pub mod bridge;
pub mod pinned;
pub mod swap;

pub use bridge::BridgeRouter;
pub use pinned::PinnedBridgeRouter;
pub use swap::SwapRouter;
