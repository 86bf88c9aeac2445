//! Interactions
//!
//! The webhook subsystem: raw-body collection, Ed25519 request
//! authentication, and dispatch of parsed interactions to command handlers.
//! Within a request the order is strict: authenticate, then parse, then
//! route. A request that fails verification never reaches parsing.

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod signing;
pub mod types;

pub use handlers::post_interaction;
pub use types::{Interaction, InteractionResponse, Invoker};
