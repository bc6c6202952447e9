//! Type-safe wrappers and enums for roster and provider data.

pub mod ids;
pub mod position;
pub mod time;

pub use ids::{AthleteId, ExternalId, LeagueId};
pub use position::Position;
pub use time::Season;
