pub mod cli;
pub mod db;
pub mod extract;
pub mod routes;
pub mod seed;

mod errors;
pub use errors::*;

mod state;
pub use state::*;
