pub mod dto;
mod notifications;
pub mod response;
mod router;

pub use router::{AppState, create_router};
