use stock_core::Stock;

/// Render capability the view-model drives. GUI bindings implement this;
/// the core never prints on its own.
pub trait RenderTarget: Send + Sync {
    /// The two sections of the main screen
    fn render_lists(&self, active: &[Stock], watchlist: &[Stock]);

    /// Transient results on the search screen
    fn render_search_results(&self, results: &[Stock]);

    /// Detail screen: a single stock with its one-step price projection
    fn render_detail(&self, stock: &Stock, projected: Option<f64>);
}

/// Plain stdout adapter
pub struct ConsoleRender;

impl RenderTarget for ConsoleRender {
    fn render_lists(&self, active: &[Stock], watchlist: &[Stock]) {
        print_section("Active", active);
        print_section("Watching", watchlist);
    }

    fn render_search_results(&self, results: &[Stock]) {
        if results.is_empty() {
            println!("No matches.");
            return;
        }

        for stock in results {
            println!("  {:<8} {:<32} ${:.2}", stock.symbol, stock.name, stock.price);
        }
    }

    fn render_detail(&self, stock: &Stock, projected: Option<f64>) {
        println!("{} ({})", stock.symbol, stock.name);
        println!("  Price: ${:.2}", stock.price);
        match projected {
            Some(price) => println!("  Predicted price: ${:.2}", price),
            None => println!("  Prediction unavailable"),
        }
    }
}

fn print_section(title: &str, stocks: &[Stock]) {
    println!("{title}:");
    if stocks.is_empty() {
        println!("  (empty)");
        return;
    }

    for stock in stocks {
        println!(
            "  {:<8} {:<32} ${:<10.2} {}",
            stock.symbol,
            stock.name,
            stock.price,
            stock.rank.as_str()
        );
    }
}
