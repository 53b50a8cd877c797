use std::sync::Arc;

use stock_core::{ListKind, Stock, StockError, StockRank, StockStore};

/// Result of a keyed mutation: whether a record with the symbol was held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    NotFound,
}

/// Result of adding a record to a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
}

/// The two in-memory stock collections, kept consistent with the durable
/// store.
///
/// Every mutation writes to the store first and touches memory only on
/// success, so a store failure surfaces as `Err` with memory unchanged.
/// Collections are insertion-ordered; a symbol appears in at most one.
pub struct StockRepository {
    store: Arc<dyn StockStore>,
    active: Vec<Stock>,
    watchlist: Vec<Stock>,
}

impl StockRepository {
    pub fn new(store: Arc<dyn StockStore>) -> Self {
        Self {
            store,
            active: Vec::new(),
            watchlist: Vec::new(),
        }
    }

    pub fn active(&self) -> &[Stock] {
        &self.active
    }

    pub fn watchlist(&self) -> &[Stock] {
        &self.watchlist
    }

    fn list(&self, kind: ListKind) -> &Vec<Stock> {
        match kind {
            ListKind::Active => &self.active,
            ListKind::Watchlist => &self.watchlist,
        }
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut Vec<Stock> {
        match kind {
            ListKind::Active => &mut self.active,
            ListKind::Watchlist => &mut self.watchlist,
        }
    }

    /// Locate a symbol, active list checked before watchlist
    fn position(&self, symbol: &str) -> Option<(ListKind, usize)> {
        if let Some(index) = self.active.iter().position(|s| s.symbol == symbol) {
            Some((ListKind::Active, index))
        } else if let Some(index) = self.watchlist.iter().position(|s| s.symbol == symbol) {
            Some((ListKind::Watchlist, index))
        } else {
            None
        }
    }

    /// Add a newly discovered stock to one of the lists.
    ///
    /// A symbol that is already tracked is rejected; lookups use first-match
    /// semantics, so a second entry could never be mutated independently.
    pub async fn add(&mut self, mut stock: Stock, list: ListKind) -> Result<AddOutcome, StockError> {
        if self.position(&stock.symbol).is_some() {
            tracing::warn!("{} is already tracked, ignoring add", stock.symbol);
            return Ok(AddOutcome::Duplicate);
        }

        stock.assign_to(list);
        self.store.upsert(&stock).await?;
        self.list_mut(list).push(stock);

        Ok(AddOutcome::Added)
    }

    /// Change the heat rank of a tracked stock
    pub async fn update_rank(
        &mut self,
        symbol: &str,
        rank: StockRank,
    ) -> Result<Mutation, StockError> {
        let (kind, index) = match self.position(symbol) {
            Some(found) => found,
            None => return Ok(Mutation::NotFound),
        };

        self.store.set_rank(symbol, rank).await?;
        self.list_mut(kind)[index].rank = rank;

        Ok(Mutation::Applied)
    }

    /// Move a stock from one list to the other
    pub async fn move_stock(
        &mut self,
        symbol: &str,
        dest: ListKind,
    ) -> Result<Mutation, StockError> {
        let source = dest.other();
        let index = match self.list(source).iter().position(|s| s.symbol == symbol) {
            Some(index) => index,
            None => return Ok(Mutation::NotFound),
        };

        self.store.set_list(symbol, dest).await?;

        let mut stock = self.list_mut(source).remove(index);
        stock.assign_to(dest);
        self.list_mut(dest).push(stock);

        Ok(Mutation::Applied)
    }

    /// Remove a stock from whichever list holds it
    pub async fn remove(&mut self, symbol: &str) -> Result<Mutation, StockError> {
        let (kind, index) = match self.position(symbol) {
            Some(found) => found,
            None => return Ok(Mutation::NotFound),
        };

        self.store.delete(symbol).await?;
        self.list_mut(kind).remove(index);

        Ok(Mutation::Applied)
    }

    /// Reload both lists from the durable store, replacing in-memory state
    pub async fn refresh(&mut self) -> Result<(), StockError> {
        self.active = self.store.fetch(ListKind::Active).await?;
        self.watchlist = self.store.fetch(ListKind::Watchlist).await?;

        Ok(())
    }
}
