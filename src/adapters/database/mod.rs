//! Catalog database integration

pub mod postgres;
pub mod traits;

pub use postgres::PostgresProductStore;
pub use traits::ProductStore;
