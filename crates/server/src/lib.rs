pub mod state;
pub mod extract;
pub mod errors;
pub mod routes;
pub mod openapi;
pub mod startup;

pub use startup::serve;
