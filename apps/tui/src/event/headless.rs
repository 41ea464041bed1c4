use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde::Serialize;
use store_prices_core::{
    compute_details, format_currency, normalize, sort_by_deviation, Catalog, DetailRow,
    PriceSummary, StoreEntry,
};

/// Print a summary of the dataset instead of starting the interface.
///
/// With `store`, prints that store's comparison against the averages.
pub fn run_headless(catalog: &Catalog, json: bool, store: Option<&str>) -> Result<()> {
    let summary = build_headless_summary(catalog, store)?;

    if json {
        let json = serde_json::to_string_pretty(&summary)?;
        println!("{json}");
    } else {
        print!("{}", render_headless_text(&summary));
    }

    Ok(())
}

fn build_headless_summary(catalog: &Catalog, store: Option<&str>) -> Result<HeadlessSummary> {
    let items = catalog
        .columns()
        .into_iter()
        .filter_map(|name| {
            catalog
                .prices
                .summary(&name)
                .map(|summary| HeadlessItem { name, summary })
        })
        .collect();

    let categories = catalog
        .categories
        .labels()
        .iter()
        .map(|label| (label.clone(), catalog.categories.item_count(label)))
        .collect();

    let store = store
        .map(|name| {
            let entry = find_store(catalog, name).ok_or_else(|| eyre!("Unknown store: {name}"))?;
            let mut rows = compute_details(entry, &catalog.prices, &catalog.categories.all_labels());
            sort_by_deviation(&mut rows);
            Ok::<_, color_eyre::Report>(HeadlessStore {
                name: entry.store.name.clone(),
                display_name: normalize(&entry.store.name),
                post: entry.store.address.postal_zip.clone(),
                rows,
            })
        })
        .transpose()?;

    Ok(HeadlessSummary {
        total_stores: catalog.dataset.len(),
        total_items: catalog.prices.len(),
        categories,
        items,
        store,
    })
}

/// Matches either the raw dataset name or its display form, ignoring case.
fn find_store<'a>(catalog: &'a Catalog, name: &str) -> Option<&'a StoreEntry> {
    catalog.dataset.find_store(name).or_else(|| {
        catalog.dataset.stores().iter().find(|entry| {
            entry.store.name.eq_ignore_ascii_case(name)
                || normalize(&entry.store.name).eq_ignore_ascii_case(name)
        })
    })
}

fn render_headless_text(summary: &HeadlessSummary) -> String {
    let mut out = String::new();

    out.push_str("\nStore Prices\n============\n");
    out.push_str(&format!("Stores: {}\n", summary.total_stores));
    out.push_str(&format!("Items: {}\n", summary.total_items));

    out.push_str("\nItems per Category:\n");
    for (label, count) in &summary.categories {
        out.push_str(&format!("- {label}: {count}\n"));
    }

    out.push_str("\nPrices (min / avg / max):\n");
    for item in &summary.items {
        out.push_str(&format!(
            "- {} | {} / {} / {} | {} stores\n",
            item.name,
            format_currency(item.summary.min),
            format_currency(item.summary.mean),
            format_currency(item.summary.max),
            item.summary.count
        ));
    }

    if let Some(store) = &summary.store {
        out.push_str(&format!(
            "\nDetails: {} ({})\n",
            store.display_name, store.post
        ));
        for row in &store.rows {
            out.push_str(&format!(
                "- {} | {} | {} | avg {}\n",
                row.name,
                format_currency(row.price),
                row.relative_deviation,
                format_currency(row.average)
            ));
        }
    }

    out
}

#[derive(Debug, Serialize)]
struct HeadlessSummary {
    total_stores: usize,
    total_items: usize,
    categories: Vec<(String, usize)>,
    items: Vec<HeadlessItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    store: Option<HeadlessStore>,
}

#[derive(Debug, Serialize)]
struct HeadlessItem {
    name: String,
    #[serde(flatten)]
    summary: PriceSummary,
}

#[derive(Debug, Serialize)]
struct HeadlessStore {
    name: String,
    display_name: String,
    post: String,
    rows: Vec<DetailRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::sample_catalog;

    #[test]
    fn summary_covers_items_and_categories() -> Result<()> {
        let catalog = sample_catalog();
        let summary = build_headless_summary(&catalog, None)?;

        assert_eq!(summary.total_stores, 2);
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.categories[0], ("Dairy".to_string(), 2));

        let milk = &summary.items[0];
        assert_eq!(milk.name, "Milk");
        assert_eq!(milk.summary.min, 2.0);
        assert_eq!(milk.summary.max, 3.0);
        assert!(summary.store.is_none());
        Ok(())
    }

    #[test]
    fn store_is_found_by_display_name() -> Result<()> {
        let catalog = sample_catalog();
        let summary = build_headless_summary(&catalog, Some("tacoma store 2"))?;
        let store = summary.store.ok_or_else(|| eyre!("store missing"))?;

        assert_eq!(store.name, "TACOMA STORE II WA");
        assert_eq!(store.rows[0].name, "Milk");
        Ok(())
    }

    #[test]
    fn unknown_store_is_an_error() {
        let catalog = sample_catalog();
        assert!(build_headless_summary(&catalog, Some("Spokane")).is_err());
    }

    #[test]
    fn text_report_lists_prices() -> Result<()> {
        let catalog = sample_catalog();
        let summary = build_headless_summary(&catalog, Some("SEATTLE STORE WA"))?;
        let text = render_headless_text(&summary);

        assert!(text.contains("Stores: 2"));
        assert!(text.contains("- Bread | $2.50 / $2.75 / $3.00 | 2 stores"));
        assert!(text.contains("Details: Seattle Store (98101)"));
        Ok(())
    }

    #[test]
    fn json_report_flattens_summaries() -> Result<()> {
        let catalog = sample_catalog();
        let summary = build_headless_summary(&catalog, None)?;
        let value = serde_json::to_value(&summary)?;

        assert_eq!(value["items"][1]["name"], "Bread");
        assert_eq!(value["items"][1]["mean"], 2.75);
        assert!(value.get("store").is_none());
        Ok(())
    }
}
