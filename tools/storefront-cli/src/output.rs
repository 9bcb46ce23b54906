//! Output formatting for the CLI.

use console::style;
use storefront_commerce::catalog::CatalogProduct;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Print products as a table.
    pub fn product_table(&self, products: &[CatalogProduct]) {
        let widths = [6, 36, 16, 10, 6, 10];
        self.table_row(&["ID", "TITLE", "BRAND", "PRICE", "RATING", "STOCK"], &widths);
        for product in products {
            let id = product.id.to_string();
            let title = truncate(&product.title, widths[1]);
            let price = product.price.to_string();
            let rating = format!("{:.1}", product.rating);
            self.table_row(
                &[
                    &id,
                    &title,
                    product.brand.as_deref().unwrap_or("-"),
                    &price,
                    &rating,
                    &stock_badge(product.stock),
                ],
                &widths,
            );
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Stock badge as shown on product cards.
pub fn stock_badge(stock: i64) -> String {
    match stock {
        s if s <= 0 => style("out of stock").red().to_string(),
        s if s < 10 => style(format!("{} left", s)).yellow().to_string(),
        s => style(s.to_string()).green().to_string(),
    }
}

/// Shorten `text` to at most `max` characters.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Lamp", 10), "Lamp");
        assert_eq!(truncate("Essence Mascara", 8), "Essence…");
    }

    #[test]
    fn test_stock_badge_text() {
        console::set_colors_enabled(false);
        assert_eq!(stock_badge(0), "out of stock");
        assert_eq!(stock_badge(3), "3 left");
        assert_eq!(stock_badge(42), "42");
    }
}
