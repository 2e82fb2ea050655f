pub mod errors;
pub mod routes;
pub mod shutdown;
pub mod startup;
pub mod state;

pub use startup::run;
