//! Helpers shared by the server library and the process binary.

pub mod utils {
    pub mod logging;
}
