pub mod db;
pub mod repository;
pub mod store;

pub use db::StockDb;
pub use repository::{AddOutcome, Mutation, StockRepository};
pub use store::SqliteStockStore;
