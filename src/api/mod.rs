//! HTTP surface: router, handlers and server loop

pub mod account_handler;
pub mod handler;
pub mod helpers;
pub mod server;
pub mod state;

// Re-export the entry points for convenience
pub use handler::build_router;
pub use server::serve;
pub use state::AppState;
