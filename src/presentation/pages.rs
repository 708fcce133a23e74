//! Dashboard and analytics pages.

use super::html::{bar_chart, cards, escape, money, number, page, section, table, tag};
use crate::analytics::descriptive::DescriptiveReport;
use crate::analytics::predictive::PredictiveReport;
use crate::analytics::prescriptive::PrescriptiveReport;

pub fn index() -> String {
    let links = [
        (
            "/analytics/descriptive",
            "Descriptive Analytics",
            "What happened: totals, averages, best sellers and customer mix.",
        ),
        (
            "/analytics/predictive",
            "Predictive Analytics",
            "What is likely: sales trend, stock-outs and customer spending.",
        ),
        (
            "/analytics/prescriptive",
            "Prescriptive Analytics",
            "What to do: restocking, pricing, retention and training.",
        ),
        (
            "/database",
            "Database",
            "Browse, add and remove records in every collection.",
        ),
    ];
    let body: String = links
        .iter()
        .map(|(href, title, text)| {
            format!(
                "<section><h2><a href=\"{}\">{}</a></h2><p>{}</p></section>",
                href,
                escape(title),
                escape(text)
            )
        })
        .collect();
    page("Shop Analytics", "Business dashboard", &body)
}

pub fn descriptive(report: &DescriptiveReport) -> String {
    let mut body = cards(&[
        ("Total Sales", money(report.total_sales)),
        ("Average Sale", money(report.average_sale)),
        ("Products", report.total_products.to_string()),
        ("Customers", report.total_customers.to_string()),
        ("Avg Customer Spending", money(report.average_customer_spending)),
        ("Inventory Value", money(report.total_inventory_value)),
    ]);

    let categories: Vec<(String, f64)> = report
        .sales_by_category
        .iter()
        .map(|c| (c.name.clone(), c.value))
        .collect();
    body.push_str(&section(
        "Sales by Category",
        "Revenue per product category",
        &bar_chart(&categories, money),
    ));

    let daily: Vec<(String, f64)> = report
        .daily_sales
        .iter()
        .map(|d| (d.date.clone(), d.sales))
        .collect();
    body.push_str(&section(
        "Sales Over Time",
        "Revenue per day",
        &bar_chart(&daily, money),
    ));

    let top: Vec<Vec<String>> = report
        .top_products
        .iter()
        .map(|p| vec![escape(&p.name), number(p.quantity), money(p.revenue)])
        .collect();
    body.push_str(&section(
        "Top Products",
        "Best sellers by units sold",
        &table(&["Product", "Units", "Revenue"], &top),
    ));

    let ages: Vec<(String, f64)> = report
        .age_distribution
        .iter()
        .map(|a| (a.name.to_string(), a.value as f64))
        .collect();
    body.push_str(&section(
        "Customer Age Distribution",
        "Customers per age group",
        &bar_chart(&ages, number),
    ));

    page(
        "Descriptive Analytics",
        "Summary statistics of historical business data",
        &body,
    )
}

pub fn predictive(report: &PredictiveReport) -> String {
    let mut body = cards(&[
        ("Current Trend", report.trend.current_trend.as_str().to_string()),
        ("Growth Rate", format!("{:.2}%", report.trend.growth_rate)),
        ("Confidence", report.trend.confidence.to_string()),
        ("30-Day Revenue Forecast", money(report.revenue_forecast)),
        ("Restock Alerts", report.restock_alerts.len().to_string()),
    ]);

    let history: Vec<(String, f64)> = report
        .historical
        .iter()
        .map(|p| (format!("Day {} (actual)", p.day), p.sales))
        .chain(
            report
                .forecast
                .iter()
                .map(|p| (format!("Day {} (predicted)", p.day), p.sales)),
        )
        .collect();
    body.push_str(&section(
        "Sales Forecast",
        "Linear regression over daily totals, projected ten days ahead",
        &bar_chart(&history, money),
    ));

    let demand: Vec<Vec<String>> = report
        .product_demand
        .iter()
        .map(|p| {
            vec![
                escape(&p.name),
                number(p.current_stock),
                format!("{:.1}", p.avg_daily_sales),
                p.days_until_reorder.to_string(),
                number(p.predicted_need.ceil()),
            ]
        })
        .collect();
    body.push_str(&section(
        "Product Demand",
        "Stock runway at the current sales velocity",
        &table(
            &["Product", "Stock", "Avg Daily Sales", "Days Left", "30-Day Need"],
            &demand,
        ),
    ));

    if !report.restock_alerts.is_empty() {
        let alerts: String = report
            .restock_alerts
            .iter()
            .map(|p| {
                format!(
                    "<li>{}: {} days remaining at current sales rate</li>",
                    escape(&p.name),
                    p.days_until_reorder
                )
            })
            .collect();
        body.push_str(&section(
            "Restock Alerts",
            "Products expected to run out within two weeks",
            &format!("<ul>{}</ul>", alerts),
        ));
    }

    let customers: Vec<Vec<String>> = report
        .customer_growth
        .iter()
        .map(|c| {
            vec![
                escape(&c.name),
                number(c.current_purchases),
                format!("{:.2}", c.predicted_purchases),
                money(c.predicted_spending),
            ]
        })
        .collect();
    body.push_str(&section(
        "Customer Projections",
        "Expected purchases over the next 30 days",
        &table(
            &["Customer", "Purchases", "Predicted Purchases", "Predicted Spending"],
            &customers,
        ),
    ));

    page(
        "Predictive Analytics",
        "Forecasts based on historical data patterns",
        &body,
    )
}

pub fn prescriptive(report: &PrescriptiveReport) -> String {
    let mut body = cards(&[
        ("Total Reorder Cost", money(report.total_reorder_cost)),
        (
            "Potential Revenue Increase",
            money(report.potential_revenue_increase),
        ),
        ("Pricing Actions", report.pricing.len().to_string()),
        ("Customer Actions", report.customers.len().to_string()),
    ]);

    let inventory: Vec<Vec<String>> = report
        .inventory
        .iter()
        .map(|i| {
            vec![
                escape(&i.name),
                number(i.current_stock),
                i.days_until_reorder
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                number(i.recommended_order),
                money(i.estimated_cost),
                tag(i.priority.as_str()),
            ]
        })
        .collect();
    body.push_str(&section(
        "Inventory Restocking",
        "Products that need attention before they run out",
        &table(
            &["Product", "Stock", "Days Left", "Order Qty", "Est. Cost", "Priority"],
            &inventory,
        ),
    ));

    let pricing: Vec<Vec<String>> = report
        .pricing
        .iter()
        .map(|p| {
            vec![
                escape(&p.name),
                money(p.current_price),
                money(p.suggested_price),
                escape(p.recommendation.as_str()),
                format!("{:.1}%", p.profit_margin),
                number(p.sales_count),
                escape(p.reason),
            ]
        })
        .collect();
    body.push_str(&section(
        "Pricing Strategy",
        "Products with pricing optimisation opportunities",
        &table(
            &["Product", "Current", "Suggested", "Action", "Margin", "Units", "Reason"],
            &pricing,
        ),
    ));

    let customers: Vec<Vec<String>> = report
        .customers
        .iter()
        .take(10)
        .map(|c| {
            vec![
                escape(&c.name),
                money(c.customer_value),
                tag(c.churn_risk.as_str()),
                escape(c.action.as_str()),
                money(c.avg_purchase_value),
            ]
        })
        .collect();
    body.push_str(&section(
        "Customer Targeting",
        "Retention and growth actions",
        &table(
            &["Customer", "Value", "Churn Risk", "Action", "Avg Purchase"],
            &customers,
        ),
    ));

    let employees: Vec<Vec<String>> = report
        .employees
        .iter()
        .map(|e| {
            vec![
                escape(&e.name),
                format!("{:.1}%", e.efficiency),
                money(e.avg_sale_value),
                escape(e.recommendation.as_str()),
            ]
        })
        .collect();
    body.push_str(&section(
        "Employee Training",
        "Development opportunities for staff",
        &table(
            &["Employee", "Efficiency", "Avg Sale", "Recommendation"],
            &employees,
        ),
    ));

    page(
        "Prescriptive Analytics",
        "Actionable recommendations for data-driven decisions",
        &body,
    )
}
