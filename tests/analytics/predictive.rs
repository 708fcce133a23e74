use chrono::NaiveDate;
use shop_analytics::analytics::predictive::{self, Trend};
use shop_analytics::analytics::regression::LinearRegression;

use crate::support::{assert_close, dataset};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
}

#[test]
fn regression_over_day_of_month() {
    let report = predictive::report(&dataset(), today());

    let days: Vec<(u32, f64)> = report.historical.iter().map(|p| (p.day, p.sales)).collect();
    assert_eq!(days, vec![(1, 600.0), (2, 500.0), (3, 2600.0)]);

    assert_close(report.regression.slope, 1000.0);
    assert_close(report.regression.intercept, -2300.0 / 3.0);
}

#[test]
fn forecast_covers_ten_days_after_last_observation() {
    let report = predictive::report(&dataset(), today());

    assert_eq!(report.forecast.len(), 10);
    assert_eq!(report.forecast[0].day, 4);
    assert_eq!(report.forecast[9].day, 13);
    assert_close(report.forecast[0].sales, 4000.0 - 2300.0 / 3.0);
}

#[test]
fn reference_points_forecast_day_four() {
    let fit = LinearRegression::fit(&[(1.0, 100.0), (2.0, 150.0), (3.0, 200.0)]);
    assert_eq!(fit.slope, 50.0);
    assert_eq!(fit.intercept, 50.0);
    assert_eq!(fit.predict(4.0), 250.0);
}

#[test]
fn revenue_forecast_and_trend() {
    let report = predictive::report(&dataset(), today());

    assert_close(report.average_daily_revenue, 3700.0 / 3.0);
    assert_close(report.revenue_forecast, 37000.0);
    assert_eq!(report.trend.current_trend, Trend::Increasing);
    assert_close(report.trend.growth_rate, 1000.0 / (3700.0 / 3.0) * 100.0);
    assert_eq!(report.trend.confidence, "Medium");
}

#[test]
fn product_demand_sorted_by_horizon() {
    let report = predictive::report(&dataset(), today());
    let names: Vec<&str> = report.product_demand.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Delta", "Beta"]);

    let alpha = &report.product_demand[0];
    assert_close(alpha.avg_daily_sales, 1.0);
    assert_eq!(alpha.days_until_reorder, 3);
    assert_close(alpha.predicted_need, 30.0);

    let delta = &report.product_demand[1];
    assert_close(delta.avg_daily_sales, 0.5);
    assert_eq!(delta.days_until_reorder, 10);
    assert_close(delta.predicted_need, 15.0);

    let alerts: Vec<&str> = report.restock_alerts.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(alerts, vec!["Alpha", "Delta"]);
}

#[test]
fn customer_projections_use_tenure() {
    let report = predictive::report(&dataset(), today());
    let names: Vec<&str> = report.customer_growth.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Ben", "Cy"]);

    // Ana: 151 days since 2024-01-01, 6 purchases at 100 each
    let ana = &report.customer_growth[0];
    assert_close(ana.predicted_purchases, 6.0 / 151.0 * 30.0);
    assert_close(ana.predicted_spending, 6.0 / 151.0 * 30.0 * 100.0);

    // Ben: 120 days, 2 purchases at 75 each
    let ben = &report.customer_growth[1];
    assert_close(ben.predicted_purchases, 0.5);
    assert_close(ben.predicted_spending, 37.5);

    let cy = &report.customer_growth[2];
    assert_close(cy.predicted_spending, 0.0);
}

#[test]
fn empty_history_is_stable_without_forecast() {
    let mut data = dataset();
    data.sales.clear();
    let report = predictive::report(&data, today());

    assert!(report.historical.is_empty());
    assert!(report.forecast.is_empty());
    assert!(report.product_demand.is_empty());
    assert_eq!(report.trend.current_trend, Trend::Stable);
    assert_eq!(report.trend.growth_rate, 0.0);
    assert_eq!(report.revenue_forecast, 0.0);
}
