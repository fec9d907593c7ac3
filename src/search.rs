//! Console search: the `mkt search` command.
//!
//! Prints a recommendation banner for the best deal followed by a
//! comparison table for one page of results. [`SearchPage`] is the same
//! payload the HTTP API returns, so `--json` output matches the server.

use anyhow::{bail, Result};
use serde::Serialize;
use std::io::{self, BufRead, Write};

use marketplace_core::models::SearchResult;
use marketplace_core::paginate::paginate;
use marketplace_core::search::SearchResults;

use crate::catalog::Catalog;
use crate::config::Config;

const TITLE_WIDTH: usize = 50;
const BANNER_WIDTH: usize = 90;

/// One page of ranked results plus the overall recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    /// `None` when no search was performed.
    pub term: Option<String>,
    pub best_deal: Option<SearchResult>,
    pub total_products: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// Global rank of the first result on this page (0-based).
    pub offset: usize,
    /// Results for `current_page` only.
    pub results: Vec<SearchResult>,
}

impl SearchPage {
    pub fn build(found: SearchResults, requested_page: i64, page_size: usize) -> Self {
        let page = paginate(&found.results, requested_page, page_size);
        Self {
            total_products: page.total_items,
            total_pages: page.total_pages,
            current_page: page.current_page,
            page_size: page.page_size,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            offset: page.offset(),
            results: page.items.to_vec(),
            term: found.term,
            best_deal: found.best_deal,
        }
    }
}

pub fn run_search(
    config: &Config,
    catalog: &Catalog,
    term: Option<String>,
    page: i64,
    json: bool,
) -> Result<()> {
    if catalog.is_empty() {
        bail!("no products were loaded from any source; search cancelled");
    }

    if !json {
        println!(
            "Successfully aggregated a total of {} products across all files.",
            catalog.len()
        );
    }

    let term = match term {
        Some(t) => t,
        None => prompt_for_term()?,
    };

    let found = catalog.search(&term, &config.display.placeholder_image);
    let result_page = SearchPage::build(found, page, config.display.page_size);

    if json {
        println!("{}", serde_json::to_string_pretty(&result_page)?);
        return Ok(());
    }

    print!("{}", render_page(&result_page));
    Ok(())
}

fn prompt_for_term() -> Result<String> {
    print!("\nEnter the product name to compare prices across all platforms: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Render a search page as console text.
pub fn render_page(page: &SearchPage) -> String {
    let Some(term) = &page.term else {
        return "\nSearch cancelled. Please run the command again to search for a product.\n"
            .to_string();
    };

    let Some(best) = &page.best_deal else {
        return format!(
            "\nNo products found matching '{}'. Please try a different query.\n",
            term
        );
    };

    let mut out = String::new();
    let hashes = "#".repeat(BANNER_WIDTH);

    out.push_str(&format!("\n{}\n", hashes));
    out.push_str("TOP PRODUCT RECOMMENDATION\n");
    out.push_str(&format!(
        "Based on highest rating and lowest final price for '{}':\n",
        term
    ));
    out.push_str(&format!("   Recommended Product: {}\n", best.title));
    out.push_str(&format!("   Rating: {}\n", best.rating));
    out.push_str(&format!("   Final Price: {}\n", best.final_price));
    out.push_str(&format!("      Seller: {}\n", best.seller_name));
    out.push_str(&format!("      URL: {}\n", best.product_url));
    out.push_str(&format!("{}\n", hashes));

    let rule = "=".repeat(BANNER_WIDTH);
    out.push_str(&format!("\n{}\n", rule));
    out.push_str(&format!(
        "Price Comparison Results for: '{}' ({} items found)\n",
        term, page.total_products
    ));
    out.push_str(&format!("{}\n", rule));

    out.push_str(&format!(
        "{:<50} | {:<15} | {:<15} | {:<6} | Seller Name | URL\n",
        "Title", "Initial Price", "Final Price", "Rating"
    ));
    out.push_str(&format!("{}\n", "-".repeat(120)));

    for (i, result) in page.results.iter().enumerate() {
        let mut title = truncate_title(&result.title, TITLE_WIDTH);
        if page.offset + i == 0 {
            title = truncate_title(&format!("{} (Recommended)", result.title), TITLE_WIDTH);
        }
        out.push_str(&format!(
            "{:<width$} | {:<15} | {:<15} | {:<6} | {} | {}\n",
            title,
            result.initial_price,
            result.final_price,
            result.rating,
            result.seller_name,
            result.product_url,
            width = TITLE_WIDTH
        ));
    }

    out.push_str(&format!(
        "\nPage {} of {} ({} items found)\n",
        page.current_page, page.total_pages, page.total_products
    ));
    if page.has_next {
        out.push_str(&format!(
            "Use --page {} to see more results.\n",
            page.current_page + 1
        ));
    }
    out.push_str("\nTip: Look for the lowest 'Final Price' to find the best deal!\n");

    out
}

/// Shorten `title` to at most `width` characters, ending in `...` when cut.
pub fn truncate_title(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        return title.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut short: String = title.chars().take(keep).collect();
    short.push_str("...");
    short
}
