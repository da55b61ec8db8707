// src/bibliography/mod.rs
pub mod enrich;
pub mod models;

pub use enrich::{add_address, AddressReport};
pub use models::Bibliography;
