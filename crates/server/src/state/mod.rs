mod pool;

mod state;
pub use state::*;
