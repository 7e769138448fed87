pub mod dto;
pub mod extract;
mod forms;
pub mod response;
mod router;
mod status;

pub use router::{AppState, create_router};
