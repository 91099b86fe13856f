//! Domain types shared across the crate: colleague records, description
//! cards, and the shuffle RNG.

pub mod card;
pub mod colleague;
pub mod rng;

pub use card::DescriptionCard;
pub use colleague::{Colleague, ColleagueDraft, ColleagueId};
pub use rng::GameRng;
