//! Descriptive statistics: totals, averages and group-by summaries.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{mean, total, Dataset};

/// Number of entries in the top-products ranking.
pub const TOP_PRODUCTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveReport {
    pub total_sales: f64,
    pub average_sale: f64,
    pub total_products: usize,
    pub total_customers: usize,
    pub average_customer_spending: f64,
    pub total_inventory_value: f64,
    pub sales_by_category: Vec<CategorySales>,
    pub daily_sales: Vec<DailySales>,
    pub top_products: Vec<TopProduct>,
    pub age_distribution: Vec<AgeGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySales {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySales {
    /// `MM/DD` label.
    pub date: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    pub name: String,
    pub quantity: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeGroup {
    pub name: &'static str,
    pub value: usize,
}

/// Customer age brackets, in display order.
const AGE_BRACKETS: [&str; 4] = ["18-24", "25-29", "30-34", "35+"];

fn age_bracket(age: Option<f64>) -> usize {
    match age {
        Some(a) if a < 25.0 => 0,
        Some(a) if a < 30.0 => 1,
        Some(a) if a < 35.0 => 2,
        _ => 3,
    }
}

/// Drop the year from a `YYYY-MM-DD` date and join the rest with slashes.
fn month_day_label(date: &str) -> String {
    date.split('-').skip(1).collect::<Vec<_>>().join("/")
}

pub fn report(data: &Dataset) -> DescriptiveReport {
    let total_sales = total(data.sales.iter().map(|s| s.total));
    let customer_spending = total(data.customers.iter().map(|c| c.total_spent));

    DescriptiveReport {
        total_sales,
        average_sale: mean(total_sales, data.sales.len()),
        total_products: data.products.len(),
        total_customers: data.customers.len(),
        average_customer_spending: mean(customer_spending, data.customers.len()),
        total_inventory_value: total(data.products.iter().map(|p| p.stock * p.cost)),
        sales_by_category: sales_by_category(data),
        daily_sales: daily_sales(data),
        top_products: top_products(data),
        age_distribution: age_distribution(data),
    }
}

/// Revenue per product category, in first-seen order. Sales of unknown
/// products are skipped.
pub fn sales_by_category(data: &Dataset) -> Vec<CategorySales> {
    let mut categories: Vec<CategorySales> = Vec::new();
    for sale in &data.sales {
        let Some(product) = data.product(sale.product_id) else {
            continue;
        };
        match categories.iter_mut().find(|c| c.name == product.category) {
            Some(entry) => entry.value += sale.total,
            None => categories.push(CategorySales {
                name: product.category.clone(),
                value: sale.total,
            }),
        }
    }
    categories
}

/// Revenue per calendar date, labelled `MM/DD` and sorted by label.
pub fn daily_sales(data: &Dataset) -> Vec<DailySales> {
    let mut by_date: Vec<(&str, f64)> = Vec::new();
    for sale in &data.sales {
        match by_date.iter_mut().find(|(date, _)| *date == sale.date) {
            Some((_, total)) => *total += sale.total,
            None => by_date.push((sale.date.as_str(), sale.total)),
        }
    }

    let mut days: Vec<DailySales> = by_date
        .into_iter()
        .map(|(date, sales)| DailySales {
            date: month_day_label(date),
            sales,
        })
        .collect();
    days.sort_by(|a, b| a.date.cmp(&b.date));
    days
}

/// Best sellers by units; ties keep ascending product id, sales without a
/// product id last.
pub fn top_products(data: &Dataset) -> Vec<TopProduct> {
    // Keyed (missing, id) so sales without a product id tie-break last.
    let mut by_product: BTreeMap<(bool, Option<i64>), (f64, f64)> = BTreeMap::new();
    for sale in &data.sales {
        let key = (sale.product_id.is_none(), sale.product_id);
        let entry = by_product.entry(key).or_insert((0.0, 0.0));
        entry.0 += sale.quantity;
        entry.1 += sale.total;
    }

    let mut ranked: Vec<TopProduct> = by_product
        .into_iter()
        .map(|((_, id), (quantity, revenue))| TopProduct {
            name: data
                .product(id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            quantity,
            revenue,
        })
        .collect();
    ranked.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));
    ranked.truncate(TOP_PRODUCTS);
    ranked
}

/// Customer counts per age bracket; empty brackets are omitted.
pub fn age_distribution(data: &Dataset) -> Vec<AgeGroup> {
    let mut counts = [0usize; 4];
    for customer in &data.customers {
        counts[age_bracket(customer.age)] += 1;
    }
    AGE_BRACKETS
        .into_iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(name, value)| AgeGroup { name, value })
        .collect()
}
