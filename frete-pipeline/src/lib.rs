//! Quoting workflow around the pricing core.
//!
//! The engine crate is pure math; this crate adds the operational shell the
//! brokerage works in: quote records and their lifecycle, the async seams to
//! the route-distance service and the config store, CSV batch quoting, and
//! the monthly dashboard aggregation.
//!
//! Collaborator traits return `Result<_, String>`; the orchestrator logs and
//! degrades (a failed route estimate becomes a zero-distance quote, it does
//! not abort the batch).

pub mod quote_loader;
pub mod quoter;
pub mod route;
pub mod store;
pub mod summary;
pub mod types;
pub mod util;

pub use quoter::Quoter;
pub use route::{FixedRouteEstimator, RouteEstimate, RouteEstimator};
pub use store::{ConfigStore, InMemoryConfigStore};
pub use summary::{summarize_month, MonthlySummary};
pub use types::{Availability, LostReason, Quote, QuoteRequest, QuoteStatus};
