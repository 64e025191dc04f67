// Recruiter dashboard: aggregate stats and the live mutation feed.

pub mod broadcast;
pub mod handlers;
pub mod websocket;

pub use broadcast::{Broadcaster, DashboardEvent, DashboardHub};
