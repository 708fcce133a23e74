//! Predictive analytics: sales trend, product demand and customer projections.
//!
//! All projections are simple extrapolations. The regression is fitted to
//! daily totals keyed by day of month, so sales from different months that
//! share a day number land in the same bucket.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::regression::LinearRegression;
use super::{average_daily_units, mean, parse_date, total, Dataset, PROJECTION_DAYS};

/// Number of day indices projected past the last observed day.
pub const FORECAST_HORIZON_DAYS: u32 = 10;

/// Reorder horizons shorter than this raise a restock alert.
pub const RESTOCK_ALERT_DAYS: i64 = 15;

/// Maximum number of restock alerts reported.
pub const RESTOCK_ALERT_LIMIT: usize = 5;

/// Confidence qualifier attached to every trend; not derived from the fit.
pub const TREND_CONFIDENCE: &str = "Medium";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveReport {
    pub historical: Vec<DailyPoint>,
    pub regression: LinearRegression,
    pub forecast: Vec<DailyPoint>,
    pub product_demand: Vec<ProductDemand>,
    pub restock_alerts: Vec<ProductDemand>,
    pub revenue_forecast: f64,
    pub average_daily_revenue: f64,
    pub customer_growth: Vec<CustomerProjection>,
    pub trend: TrendAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyPoint {
    pub day: u32,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDemand {
    pub name: String,
    pub current_stock: f64,
    pub avg_daily_sales: f64,
    /// Whole days until stock runs out; 0 when it cannot be computed.
    pub days_until_reorder: i64,
    pub predicted_need: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProjection {
    pub name: String,
    pub current_purchases: f64,
    pub predicted_purchases: f64,
    pub predicted_spending: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Trend::Increasing
        } else if slope < 0.0 {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Increasing => "Increasing",
            Trend::Decreasing => "Decreasing",
            Trend::Stable => "Stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub current_trend: Trend,
    /// Slope as a percentage of the average daily total.
    pub growth_rate: f64,
    pub confidence: &'static str,
}

/// Build the report. `today` anchors the customer tenure calculation.
pub fn report(data: &Dataset, today: NaiveDate) -> PredictiveReport {
    let historical = daily_totals(data);
    let points: Vec<(f64, f64)> = historical
        .iter()
        .map(|p| (f64::from(p.day), p.sales))
        .collect();
    let regression = LinearRegression::fit(&points);
    let forecast = forecast(&historical, &regression);

    let product_demand = product_demand(data);
    let restock_alerts = product_demand
        .iter()
        .filter(|p| p.days_until_reorder > 0 && p.days_until_reorder < RESTOCK_ALERT_DAYS)
        .take(RESTOCK_ALERT_LIMIT)
        .cloned()
        .collect();

    let revenue = total(historical.iter().map(|p| p.sales));
    let average_daily_revenue = mean(revenue, historical.len());
    let growth_rate = if average_daily_revenue == 0.0 {
        0.0
    } else {
        regression.slope / average_daily_revenue * 100.0
    };

    PredictiveReport {
        historical,
        regression,
        forecast,
        product_demand,
        restock_alerts,
        revenue_forecast: average_daily_revenue * PROJECTION_DAYS,
        average_daily_revenue,
        customer_growth: customer_growth(data, today),
        trend: TrendAnalysis {
            current_trend: Trend::from_slope(regression.slope),
            growth_rate,
            confidence: TREND_CONFIDENCE,
        },
    }
}

/// Sale totals summed per day of month, ascending by day. Sales with an
/// unreadable date are left out.
pub fn daily_totals(data: &Dataset) -> Vec<DailyPoint> {
    let mut by_day: BTreeMap<u32, f64> = BTreeMap::new();
    for sale in &data.sales {
        if let Some(date) = parse_date(&sale.date) {
            *by_day.entry(date.day()).or_insert(0.0) += sale.total;
        }
    }
    by_day
        .into_iter()
        .map(|(day, sales)| DailyPoint { day, sales })
        .collect()
}

/// Projected totals for the days following the last observed day, floored at
/// zero. Empty without history.
pub fn forecast(historical: &[DailyPoint], regression: &LinearRegression) -> Vec<DailyPoint> {
    let Some(last_day) = historical.iter().map(|p| p.day).max() else {
        return Vec::new();
    };
    (last_day + 1..=last_day + FORECAST_HORIZON_DAYS)
        .map(|day| DailyPoint {
            day,
            sales: regression.predict(f64::from(day)).max(0.0),
        })
        .collect()
}

/// Whole days of stock left at the given daily rate, if both are positive.
pub(crate) fn reorder_horizon(stock: f64, avg_daily_sales: f64) -> Option<i64> {
    (stock > 0.0 && avg_daily_sales > 0.0).then(|| (stock / avg_daily_sales).floor() as i64)
}

/// Demand for every product that has sold, soonest stock-out first.
pub fn product_demand(data: &Dataset) -> Vec<ProductDemand> {
    let mut demand: Vec<ProductDemand> = data
        .products
        .iter()
        .map(|product| {
            let avg_daily_sales = average_daily_units(data, product);
            ProductDemand {
                name: product.name.clone(),
                current_stock: product.stock,
                avg_daily_sales,
                days_until_reorder: reorder_horizon(product.stock, avg_daily_sales).unwrap_or(0),
                predicted_need: avg_daily_sales * PROJECTION_DAYS,
            }
        })
        .filter(|p| p.avg_daily_sales > 0.0)
        .collect();
    demand.sort_by_key(|p| p.days_until_reorder);
    demand
}

/// Per-customer purchase projection for the next month, highest projected
/// spending first.
pub fn customer_growth(data: &Dataset, today: NaiveDate) -> Vec<CustomerProjection> {
    let mut projections: Vec<CustomerProjection> = data
        .customers
        .iter()
        .map(|customer| {
            let days_since_join = parse_date(&customer.join_date)
                .map(|joined| (today - joined).num_days())
                .unwrap_or(0);
            let purchase_rate = if days_since_join > 0 {
                customer.total_purchases / days_since_join as f64
            } else {
                0.0
            };
            let predicted_purchases = purchase_rate * PROJECTION_DAYS;
            let avg_order_value = if customer.total_purchases > 0.0 {
                customer.total_spent / customer.total_purchases
            } else {
                0.0
            };
            CustomerProjection {
                name: customer.name.clone(),
                current_purchases: customer.total_purchases,
                predicted_purchases,
                predicted_spending: predicted_purchases * avg_order_value,
            }
        })
        .collect();
    projections.sort_by(|a, b| b.predicted_spending.total_cmp(&a.predicted_spending));
    projections
}
