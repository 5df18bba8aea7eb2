//! Random shayari notifications
//!
//! - [`Dispatcher`]: picks a random poem and fans it out to every registered
//!   device, pruning tokens FCM reports as dead
//! - [`Scheduler`]: runs the dispatcher on a fixed interval and once a day at
//!   a local wall-clock time
//! - [`routes`]: device registration and the manual trigger

pub mod dispatcher;
#[cfg(test)]
mod dispatcher_test;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod routes;
pub mod scheduler;
#[cfg(test)]
mod scheduler_test;
#[cfg(test)]
mod test_support;
pub mod title;

pub use dispatcher::{DispatchError, DispatchOutcome, DispatchReport, Dispatcher};
pub use routes::routes;
pub use scheduler::Scheduler;
pub use title::{Occasion, TitlePolicy};
