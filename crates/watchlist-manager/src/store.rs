use async_trait::async_trait;
use sqlx::FromRow;
use stock_core::{ListKind, Stock, StockError, StockRank, StockStore};

use crate::db::StockDb;

/// Row shape for the `stocks` table; rank is stored as its display string.
#[derive(Debug, FromRow)]
struct StockRow {
    symbol: String,
    name: String,
    price: f64,
    is_active: bool,
    is_in_watchlist: bool,
    rank: String,
}

impl From<StockRow> for Stock {
    fn from(row: StockRow) -> Self {
        Stock {
            symbol: row.symbol,
            name: row.name,
            price: row.price,
            is_active: row.is_active,
            is_in_watchlist: row.is_in_watchlist,
            rank: StockRank::from_str(&row.rank),
        }
    }
}

/// SQLite-backed durable store for tracked stocks
pub struct SqliteStockStore {
    db: StockDb,
}

impl SqliteStockStore {
    pub fn new(db: StockDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StockStore for SqliteStockStore {
    async fn upsert(&self, stock: &Stock) -> Result<(), StockError> {
        sqlx::query(
            r#"
            INSERT INTO stocks (symbol, name, price, is_active, is_in_watchlist, rank)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(symbol) DO UPDATE SET
                name = excluded.name,
                price = excluded.price,
                is_active = excluded.is_active,
                is_in_watchlist = excluded.is_in_watchlist,
                rank = excluded.rank
            "#,
        )
        .bind(&stock.symbol)
        .bind(&stock.name)
        .bind(stock.price)
        .bind(stock.is_active)
        .bind(stock.is_in_watchlist)
        .bind(stock.rank.as_str())
        .execute(self.db.pool())
        .await
        .map_err(|e| StockError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn set_rank(&self, symbol: &str, rank: StockRank) -> Result<(), StockError> {
        sqlx::query("UPDATE stocks SET rank = ? WHERE symbol = ?")
            .bind(rank.as_str())
            .bind(symbol)
            .execute(self.db.pool())
            .await
            .map_err(|e| StockError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn set_list(&self, symbol: &str, list: ListKind) -> Result<(), StockError> {
        let is_active = list == ListKind::Active;

        sqlx::query("UPDATE stocks SET is_active = ?, is_in_watchlist = ? WHERE symbol = ?")
            .bind(is_active)
            .bind(!is_active)
            .bind(symbol)
            .execute(self.db.pool())
            .await
            .map_err(|e| StockError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, symbol: &str) -> Result<(), StockError> {
        sqlx::query("DELETE FROM stocks WHERE symbol = ?")
            .bind(symbol)
            .execute(self.db.pool())
            .await
            .map_err(|e| StockError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn fetch(&self, filter: ListKind) -> Result<Vec<Stock>, StockError> {
        // rowid order preserves insertion order, which is the display order.
        let sql = match filter {
            ListKind::Active => "SELECT * FROM stocks WHERE is_active = 1 ORDER BY rowid",
            ListKind::Watchlist => "SELECT * FROM stocks WHERE is_in_watchlist = 1 ORDER BY rowid",
        };

        let rows = sqlx::query_as::<_, StockRow>(sql)
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| StockError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Stock::from).collect())
    }
}
