use shop_analytics::analytics::prescriptive::{
    self, ChurnRisk, CustomerAction, EmployeeAction, PricingAction, Priority,
};

use crate::support::{assert_close, dataset};

#[test]
fn inventory_keeps_high_and_medium_priorities() {
    let report = prescriptive::report(&dataset());
    let rows: Vec<(&str, Priority, Option<i64>)> = report
        .inventory
        .iter()
        .map(|i| (i.name.as_str(), i.priority, i.days_until_reorder))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("Alpha", Priority::High, Some(3)),
            ("Delta", Priority::Medium, Some(10)),
        ]
    );
    assert_close(report.inventory[0].recommended_order, 30.0);
    assert_close(report.inventory[0].estimated_cost, 2700.0);
    assert_close(report.inventory[1].recommended_order, 15.0);
    assert_close(report.inventory[1].estimated_cost, 4500.0);
    assert_close(report.total_reorder_cost, 7200.0);
}

#[test]
fn low_margin_high_volume_product_gets_price_increase() {
    let report = prescriptive::report(&dataset());
    let alpha = report
        .pricing
        .iter()
        .find(|p| p.name == "Alpha")
        .expect("Alpha has a pricing action");

    // revenue 1000, 10 units at cost 90 -> 10% margin
    assert_close(alpha.profit_margin, 10.0);
    assert_eq!(alpha.recommendation, PricingAction::Increase);
    assert_close(alpha.suggested_price, 100.0 * 1.1);
    assert_close(report.potential_revenue_increase, 50.0);
}

#[test]
fn pricing_drops_maintain_rows() {
    let report = prescriptive::report(&dataset());
    let actions: Vec<(&str, PricingAction)> = report
        .pricing
        .iter()
        .map(|p| (p.name.as_str(), p.recommendation))
        .collect();

    assert_eq!(
        actions,
        vec![
            ("Alpha", PricingAction::Increase),
            ("Beta", PricingAction::Decrease),
            ("Gamma", PricingAction::Promote),
        ]
    );
    assert_close(report.pricing[1].suggested_price, 45.0);
    assert_close(report.pricing[2].suggested_price, 170.0);
}

#[test]
fn customers_ranked_by_value() {
    let report = prescriptive::report(&dataset());
    let rows: Vec<(&str, ChurnRisk, CustomerAction)> = report
        .customers
        .iter()
        .map(|c| (c.name.as_str(), c.churn_risk, c.action))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("Cy", ChurnRisk::High, CustomerAction::WinBack),
            ("Ben", ChurnRisk::Low, CustomerAction::Upsell),
        ]
    );
    assert_close(report.customers[1].avg_purchase_value, 400.0);
}

#[test]
fn employees_compared_to_team_average() {
    let report = prescriptive::report(&dataset());
    let rows: Vec<(&str, EmployeeAction)> = report
        .employees
        .iter()
        .map(|e| (e.name.as_str(), e.recommendation))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("Eve", EmployeeAction::ProductKnowledge),
            ("Finn", EmployeeAction::SalesTraining),
            ("Gus", EmployeeAction::ProductKnowledge),
        ]
    );
    assert_close(report.employees[0].efficiency, 100.0);
    assert_close(report.employees[1].efficiency, 20.0);
    assert_close(report.employees[2].avg_sale_value, 2500.0);
}

#[test]
fn labels_serialize_as_display_text() {
    let value = serde_json::to_value(prescriptive::report(&dataset())).unwrap();
    assert_eq!(value["customers"][0]["action"], "Win Back Campaign");
    assert_eq!(value["employees"][1]["recommendation"], "Sales Training Needed");
    assert_eq!(value["inventory"][0]["priority"], "High");
}
