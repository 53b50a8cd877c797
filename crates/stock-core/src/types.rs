use serde::{Deserialize, Serialize};

/// Manually assigned heat tag for a tracked stock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockRank {
    #[default]
    Cold,
    Hot,
    VeryHot,
}

impl StockRank {
    pub fn as_str(&self) -> &str {
        match self {
            StockRank::Cold => "Cold",
            StockRank::Hot => "Hot",
            StockRank::VeryHot => "Very Hot",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s {
            "Hot" => StockRank::Hot,
            "Very Hot" => StockRank::VeryHot,
            _ => StockRank::Cold,
        }
    }
}

/// One of the two user-curated lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListKind {
    Active,
    Watchlist,
}

impl ListKind {
    /// The opposite list
    pub fn other(&self) -> Self {
        match self {
            ListKind::Active => ListKind::Watchlist,
            ListKind::Watchlist => ListKind::Active,
        }
    }
}

/// A stock the user tracks or has discovered through search.
///
/// At most one of `is_active` / `is_in_watchlist` is true for any record
/// held by the repository; both are false for transient search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub is_active: bool,
    pub is_in_watchlist: bool,
    pub rank: StockRank,
}

impl Stock {
    /// A transient, untracked record as produced by symbol search
    pub fn discovered(symbol: String, name: String, price: f64) -> Self {
        Self {
            symbol,
            name,
            price,
            is_active: false,
            is_in_watchlist: false,
            rank: StockRank::Cold,
        }
    }

    /// The list currently holding this record, if any
    pub fn list(&self) -> Option<ListKind> {
        if self.is_active {
            Some(ListKind::Active)
        } else if self.is_in_watchlist {
            Some(ListKind::Watchlist)
        } else {
            None
        }
    }

    /// Set the list flags so that exactly one matches `list`
    pub fn assign_to(&mut self, list: ListKind) {
        self.is_active = list == ListKind::Active;
        self.is_in_watchlist = list == ListKind::Watchlist;
    }
}
