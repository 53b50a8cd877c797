use std::sync::Arc;
use std::time::Duration;

use msfinance_client::MsFinanceClient;
use stock_core::{ListKind, Stock, StockRank};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use watchlist_manager::{AddOutcome, Mutation, StockRepository};

use crate::render::RenderTarget;

/// Presentation state and intent handling for the stock lists and the
/// search screen.
///
/// Callers serialize intents on a single logical task. The only spawned
/// work is the debounced search lookup, which owns clones of the client
/// and render handles and never touches the repository.
pub struct StockListViewModel {
    repository: StockRepository,
    client: MsFinanceClient,
    render: Arc<dyn RenderTarget>,
    search_results: Arc<Mutex<Vec<Stock>>>,
    search_task: Option<JoinHandle<()>>,
    debounce: Duration,
}

impl StockListViewModel {
    pub fn new(
        repository: StockRepository,
        client: MsFinanceClient,
        render: Arc<dyn RenderTarget>,
        debounce: Duration,
    ) -> Self {
        Self {
            repository,
            client,
            render,
            search_results: Arc::new(Mutex::new(Vec::new())),
            search_task: None,
            debounce,
        }
    }

    pub fn repository(&self) -> &StockRepository {
        &self.repository
    }

    fn render_lists(&self) {
        self.render
            .render_lists(self.repository.active(), self.repository.watchlist());
    }

    /// Reload both lists from the durable store and render them
    pub async fn refresh(&mut self) {
        if let Err(e) = self.repository.refresh().await {
            tracing::error!("Failed to load stocks: {e}");
            return;
        }

        self.render_lists();
    }

    /// A result from the most recent search, if present
    pub async fn search_result(&self, symbol: &str) -> Option<Stock> {
        self.search_results
            .lock()
            .await
            .iter()
            .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
            .cloned()
    }

    /// Promote a discovered stock into one of the lists
    pub async fn add_stock(&mut self, stock: Stock, list: ListKind) {
        let symbol = stock.symbol.clone();

        match self.repository.add(stock, list).await {
            Ok(AddOutcome::Added) => self.render_lists(),
            Ok(AddOutcome::Duplicate) => tracing::warn!("{symbol} is already tracked"),
            Err(e) => tracing::error!("Failed to add {symbol}: {e}"),
        }
    }

    /// Change the heat rank of a tracked stock
    pub async fn set_rank(&mut self, symbol: &str, rank: StockRank) {
        match self.repository.update_rank(symbol, rank).await {
            Ok(Mutation::Applied) => self.render_lists(),
            Ok(Mutation::NotFound) => tracing::warn!("{symbol} is not tracked"),
            Err(e) => tracing::error!("Failed to update rank for {symbol}: {e}"),
        }
    }

    /// Move a tracked stock to the other list
    pub async fn move_stock(&mut self, symbol: &str, dest: ListKind) {
        match self.repository.move_stock(symbol, dest).await {
            Ok(Mutation::Applied) => self.render_lists(),
            Ok(Mutation::NotFound) => tracing::warn!("{symbol} is not in the source list"),
            Err(e) => tracing::error!("Failed to move {symbol}: {e}"),
        }
    }

    /// Remove a tracked stock from whichever list holds it
    pub async fn remove(&mut self, symbol: &str) {
        match self.repository.remove(symbol).await {
            Ok(Mutation::Applied) => self.render_lists(),
            Ok(Mutation::NotFound) => tracing::warn!("{symbol} is not tracked"),
            Err(e) => tracing::error!("Failed to remove {symbol}: {e}"),
        }
    }

    /// Schedule a search for the query, cancelling any pending lookup.
    ///
    /// The lookup runs after the debounce interval; rapid input therefore
    /// issues at most one request. Client errors degrade to an empty
    /// rendered result list.
    pub fn search_input(&mut self, query: &str) {
        if let Some(task) = self.search_task.take() {
            task.abort();
        }

        let query = query.to_string();
        let client = self.client.clone();
        let render = Arc::clone(&self.render);
        let results = Arc::clone(&self.search_results);
        let delay = self.debounce;

        self.search_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let stocks = match client.search(&query).await {
                Ok(stocks) => stocks,
                Err(e) => {
                    tracing::error!("Search for {query:?} failed: {e}");
                    Vec::new()
                }
            };

            let mut held = results.lock().await;
            *held = stocks;
            render.render_search_results(&held);
        }));
    }

    /// Render a tracked stock with its one-step price projection
    pub fn show_detail(&self, symbol: &str) {
        let stock = self
            .repository
            .active()
            .iter()
            .chain(self.repository.watchlist())
            .find(|s| s.symbol.eq_ignore_ascii_case(symbol));

        let stock = match stock {
            Some(stock) => stock,
            None => {
                tracing::warn!("{symbol} is not tracked");
                return;
            }
        };

        let history = recent_prices(&stock.symbol);
        self.render
            .render_detail(stock, trend_estimator::project_next(&history));
    }
}

/// Recent closing prices for the projection.
// TODO: replace with a real quote-history lookup; the auto-complete API
// only returns point-in-time prices.
fn recent_prices(_symbol: &str) -> Vec<f64> {
    vec![100.0, 101.0, 102.5, 103.0, 104.0, 105.5, 106.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderTarget;
    use watchlist_manager::{SqliteStockStore, StockDb};

    struct RecordingRender {
        events: std::sync::Mutex<Vec<String>>,
    }

    impl RecordingRender {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                events: std::sync::Mutex::new(Vec::new()),
            })
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl RenderTarget for RecordingRender {
        fn render_lists(&self, active: &[Stock], watchlist: &[Stock]) {
            self.events
                .lock()
                .unwrap()
                .push(format!("lists:{}:{}", active.len(), watchlist.len()));
        }

        fn render_search_results(&self, results: &[Stock]) {
            self.events
                .lock()
                .unwrap()
                .push(format!("search:{}", results.len()));
        }

        fn render_detail(&self, stock: &Stock, projected: Option<f64>) {
            self.events
                .lock()
                .unwrap()
                .push(format!("detail:{}:{}", stock.symbol, projected.is_some()));
        }
    }

    async fn setup_view_model(render: Arc<RecordingRender>) -> StockListViewModel {
        let db = StockDb::new("sqlite::memory:").await.unwrap();
        let repository = StockRepository::new(Arc::new(SqliteStockStore::new(db)));
        let client = MsFinanceClient::new("test-key".to_string(), "api.invalid".to_string());

        StockListViewModel::new(repository, client, render, Duration::from_millis(50))
    }

    fn discovered(symbol: &str) -> Stock {
        Stock::discovered(symbol.to_string(), format!("{symbol} Inc."), 100.0)
    }

    #[tokio::test]
    async fn test_add_renders_updated_lists() {
        let render = RecordingRender::new();
        let mut vm = setup_view_model(Arc::clone(&render)).await;

        vm.add_stock(discovered("AAPL"), ListKind::Active).await;

        assert_eq!(vm.repository().active().len(), 1);
        assert_eq!(render.events(), vec!["lists:1:0"]);
    }

    #[tokio::test]
    async fn test_intents_forward_to_repository() {
        let render = RecordingRender::new();
        let mut vm = setup_view_model(Arc::clone(&render)).await;

        vm.add_stock(discovered("AAPL"), ListKind::Active).await;
        vm.set_rank("AAPL", StockRank::Hot).await;
        vm.move_stock("AAPL", ListKind::Watchlist).await;

        let stock = &vm.repository().watchlist()[0];
        assert_eq!(stock.rank, StockRank::Hot);
        assert!(stock.is_in_watchlist);

        vm.remove("AAPL").await;
        assert!(vm.repository().watchlist().is_empty());
        assert_eq!(render.events().len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_symbol_leaves_rendered_state_unchanged() {
        let render = RecordingRender::new();
        let mut vm = setup_view_model(Arc::clone(&render)).await;

        vm.set_rank("NOPE", StockRank::Hot).await;
        vm.move_stock("NOPE", ListKind::Active).await;
        vm.remove("NOPE").await;

        assert!(render.events().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_add_does_not_rerender() {
        let render = RecordingRender::new();
        let mut vm = setup_view_model(Arc::clone(&render)).await;

        vm.add_stock(discovered("AAPL"), ListKind::Active).await;
        vm.add_stock(discovered("AAPL"), ListKind::Watchlist).await;

        assert_eq!(render.events(), vec!["lists:1:0"]);
    }

    #[tokio::test]
    async fn test_rapid_search_input_coalesces_to_one_lookup() {
        let render = RecordingRender::new();
        let mut vm = setup_view_model(Arc::clone(&render)).await;

        // Whitespace queries short-circuit in the client, so no network is
        // involved; each still schedules a debounced lookup.
        vm.search_input(" ");
        vm.search_input("  ");
        vm.search_input("   ");

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(render.events(), vec!["search:0"]);
    }

    #[tokio::test]
    async fn test_show_detail_renders_projection() {
        let render = RecordingRender::new();
        let mut vm = setup_view_model(Arc::clone(&render)).await;

        vm.add_stock(discovered("AAPL"), ListKind::Watchlist).await;
        vm.show_detail("aapl");

        let events = render.events();
        assert_eq!(events.last().unwrap(), "detail:AAPL:true");
    }
}
