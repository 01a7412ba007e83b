pub mod date;

mod uuid;
pub use uuid::*;
