use async_trait::async_trait;

use crate::{ListKind, Stock, StockError, StockRank};

/// Durable backing store for tracked stocks, keyed by symbol.
///
/// Field updates and deletes for an absent symbol succeed without effect;
/// the repository reports those as explicit no-ops.
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Insert the record, or overwrite every field of an existing row
    async fn upsert(&self, stock: &Stock) -> Result<(), StockError>;

    /// Update the stored rank for a symbol
    async fn set_rank(&self, symbol: &str, rank: StockRank) -> Result<(), StockError>;

    /// Update the list flags for a symbol so that exactly one matches `list`
    async fn set_list(&self, symbol: &str, list: ListKind) -> Result<(), StockError>;

    /// Delete the record for a symbol
    async fn delete(&self, symbol: &str) -> Result<(), StockError>;

    /// All records whose flag matches `filter`, in insertion order
    async fn fetch(&self, filter: ListKind) -> Result<Vec<Stock>, StockError>;
}
