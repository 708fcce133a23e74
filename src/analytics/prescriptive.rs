//! Prescriptive analytics: fixed rule tables that turn metrics into actions.
//!
//! Every threshold here is a business heuristic and is applied literally.

use serde::Serialize;

use super::predictive::reorder_horizon;
use super::{average_daily_units, mean, total, Dataset, PROJECTION_DAYS};

/// Units assumed sold at the new price when estimating the gain from a price
/// increase.
pub const PRICE_INCREASE_UNITS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptiveReport {
    pub inventory: Vec<InventoryRecommendation>,
    pub total_reorder_cost: f64,
    pub pricing: Vec<PricingRecommendation>,
    pub potential_revenue_increase: f64,
    pub customers: Vec<CustomerRecommendation>,
    pub employees: Vec<EmployeeRecommendation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Priority for a reorder horizon; no horizon counts as plenty of stock.
    pub fn for_horizon(days: Option<i64>) -> Self {
        match days {
            Some(d) if d < 7 => Priority::High,
            Some(d) if d < 15 => Priority::Medium,
            _ => Priority::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecommendation {
    pub name: String,
    pub current_stock: f64,
    pub recommended_order: f64,
    pub priority: Priority,
    /// `None` when the horizon cannot be computed (no stock or no sales).
    pub days_until_reorder: Option<i64>,
    pub estimated_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PricingAction {
    Increase,
    Decrease,
    Promote,
    Maintain,
}

impl PricingAction {
    pub fn as_str(self) -> &'static str {
        match self {
            PricingAction::Increase => "Increase",
            PricingAction::Decrease => "Decrease",
            PricingAction::Promote => "Promote",
            PricingAction::Maintain => "Maintain",
        }
    }

    /// Multiplier applied to the current price.
    pub fn price_factor(self) -> f64 {
        match self {
            PricingAction::Increase => 1.1,
            PricingAction::Decrease => 0.9,
            PricingAction::Promote => 0.85,
            PricingAction::Maintain => 1.0,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            PricingAction::Increase => "Low profit margin with good sales volume",
            PricingAction::Decrease => "High margin but low sales - price may be too high",
            PricingAction::Promote => "No sales - consider promotional pricing",
            PricingAction::Maintain => "Current pricing is optimal",
        }
    }

    /// First matching rule wins.
    pub fn decide(profit_margin: f64, units_sold: f64) -> Self {
        if profit_margin < 20.0 && units_sold > 5.0 {
            PricingAction::Increase
        } else if profit_margin > 50.0 && units_sold < 3.0 {
            PricingAction::Decrease
        } else if units_sold == 0.0 {
            PricingAction::Promote
        } else {
            PricingAction::Maintain
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRecommendation {
    pub name: String,
    pub current_price: f64,
    pub suggested_price: f64,
    pub recommendation: PricingAction,
    pub reason: &'static str,
    /// Percent.
    pub profit_margin: f64,
    pub sales_count: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChurnRisk {
    Low,
    Medium,
    High,
}

impl ChurnRisk {
    pub fn for_days_since_purchase(days: u32) -> Self {
        if days > 20 {
            ChurnRisk::High
        } else if days > 10 {
            ChurnRisk::Medium
        } else {
            ChurnRisk::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChurnRisk::Low => "Low",
            ChurnRisk::Medium => "Medium",
            ChurnRisk::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CustomerAction {
    #[serde(rename = "Win Back Campaign")]
    WinBack,
    #[serde(rename = "Engagement Email")]
    Engagement,
    #[serde(rename = "Upsell Opportunity")]
    Upsell,
    Maintain,
}

impl CustomerAction {
    pub fn as_str(self) -> &'static str {
        match self {
            CustomerAction::WinBack => "Win Back Campaign",
            CustomerAction::Engagement => "Engagement Email",
            CustomerAction::Upsell => "Upsell Opportunity",
            CustomerAction::Maintain => "Maintain",
        }
    }

    pub fn decide(customer_value: f64, churn: ChurnRisk, avg_purchase_value: f64) -> Self {
        if customer_value > 500.0 && churn == ChurnRisk::High {
            CustomerAction::WinBack
        } else if customer_value > 300.0 && churn == ChurnRisk::Medium {
            CustomerAction::Engagement
        } else if customer_value < 200.0 && avg_purchase_value > 50.0 {
            CustomerAction::Upsell
        } else {
            CustomerAction::Maintain
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecommendation {
    pub name: String,
    pub customer_value: f64,
    pub churn_risk: ChurnRisk,
    pub action: CustomerAction,
    pub avg_purchase_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmployeeAction {
    #[serde(rename = "Sales Training Needed")]
    SalesTraining,
    #[serde(rename = "Upselling Training")]
    UpsellingTraining,
    #[serde(rename = "Product Knowledge Training")]
    ProductKnowledge,
    #[serde(rename = "No Action")]
    NoAction,
}

impl EmployeeAction {
    pub fn as_str(self) -> &'static str {
        match self {
            EmployeeAction::SalesTraining => "Sales Training Needed",
            EmployeeAction::UpsellingTraining => "Upselling Training",
            EmployeeAction::ProductKnowledge => "Product Knowledge Training",
            EmployeeAction::NoAction => "No Action",
        }
    }

    pub fn decide(
        efficiency: f64,
        average_efficiency: f64,
        avg_sale_value: f64,
        sale_count: usize,
    ) -> Self {
        if efficiency < average_efficiency * 0.8 {
            EmployeeAction::SalesTraining
        } else if avg_sale_value < 30.0 {
            EmployeeAction::UpsellingTraining
        } else if sale_count < 20 {
            EmployeeAction::ProductKnowledge
        } else {
            EmployeeAction::NoAction
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecommendation {
    pub name: String,
    /// Revenue as a percentage of salary.
    pub efficiency: f64,
    pub avg_sale_value: f64,
    pub recommendation: EmployeeAction,
}

pub fn report(data: &Dataset) -> PrescriptiveReport {
    let inventory = inventory(data);
    let pricing = pricing(data);

    let total_reorder_cost = total(inventory.iter().map(|i| i.estimated_cost));
    let potential_revenue_increase = total(
        pricing
            .iter()
            .filter(|p| p.recommendation == PricingAction::Increase)
            .map(|p| (p.suggested_price - p.current_price) * PRICE_INCREASE_UNITS),
    );

    PrescriptiveReport {
        inventory,
        total_reorder_cost,
        pricing,
        potential_revenue_increase,
        customers: customers(data),
        employees: employees(data),
    }
}

/// Restock actions for High and Medium priority products, High first.
pub fn inventory(data: &Dataset) -> Vec<InventoryRecommendation> {
    let mut rows: Vec<InventoryRecommendation> = data
        .products
        .iter()
        .map(|product| {
            let avg_daily_sales = average_daily_units(data, product);
            let days_until_reorder = reorder_horizon(product.stock, avg_daily_sales);
            let recommended_order = (avg_daily_sales * PROJECTION_DAYS).ceil();
            InventoryRecommendation {
                name: product.name.clone(),
                current_stock: product.stock,
                recommended_order,
                priority: Priority::for_horizon(days_until_reorder),
                days_until_reorder,
                estimated_cost: recommended_order * product.cost,
            }
        })
        .filter(|row| row.priority != Priority::Low)
        .collect();
    rows.sort_by_key(|row| row.priority);
    rows
}

/// Price changes for products outside the Maintain band.
pub fn pricing(data: &Dataset) -> Vec<PricingRecommendation> {
    data.products
        .iter()
        .map(|product| {
            let (units_sold, revenue) = data
                .sales_of_product(product)
                .fold((0.0, 0.0), |(units, revenue), s| (units + s.quantity, revenue + s.total));
            let profit_margin = if revenue > 0.0 {
                (revenue - units_sold * product.cost) / revenue * 100.0
            } else {
                0.0
            };
            let action = PricingAction::decide(profit_margin, units_sold);
            PricingRecommendation {
                name: product.name.clone(),
                current_price: product.price,
                suggested_price: product.price * action.price_factor(),
                recommendation: action,
                reason: action.reason(),
                profit_margin,
                sales_count: units_sold,
            }
        })
        .filter(|row| row.recommendation != PricingAction::Maintain)
        .collect()
}

/// Days since the last purchase, approximated: 10 with any sale on record,
/// otherwise 30.
fn days_since_last_purchase(has_sales: bool) -> u32 {
    if has_sales {
        10
    } else {
        30
    }
}

/// Retention actions, most valuable customers first.
pub fn customers(data: &Dataset) -> Vec<CustomerRecommendation> {
    let mut rows: Vec<CustomerRecommendation> = data
        .customers
        .iter()
        .map(|customer| {
            let (count, spent) = data
                .sales_to_customer(customer)
                .fold((0usize, 0.0), |(count, spent), s| (count + 1, spent + s.total));
            let avg_purchase_value = mean(spent, count);
            let churn_risk = ChurnRisk::for_days_since_purchase(days_since_last_purchase(count > 0));
            CustomerRecommendation {
                name: customer.name.clone(),
                customer_value: customer.total_spent,
                churn_risk,
                action: CustomerAction::decide(customer.total_spent, churn_risk, avg_purchase_value),
                avg_purchase_value,
            }
        })
        .filter(|row| row.action != CustomerAction::Maintain)
        .collect();
    rows.sort_by(|a, b| b.customer_value.total_cmp(&a.customer_value));
    rows
}

/// Training suggestions for employees measured against the team average.
pub fn employees(data: &Dataset) -> Vec<EmployeeRecommendation> {
    struct Performance {
        revenue: f64,
        sale_count: usize,
        efficiency: f64,
    }

    let performance: Vec<Performance> = data
        .employees
        .iter()
        .map(|employee| {
            let (sale_count, revenue) = data
                .sales_by_employee(employee)
                .fold((0usize, 0.0), |(count, revenue), s| (count + 1, revenue + s.total));
            let efficiency = if sale_count > 0 && employee.salary > 0.0 {
                revenue / employee.salary * 100.0
            } else {
                0.0
            };
            Performance {
                revenue,
                sale_count,
                efficiency,
            }
        })
        .collect();

    let average_efficiency = mean(
        total(performance.iter().map(|p| p.efficiency)),
        performance.len(),
    );

    data.employees
        .iter()
        .zip(&performance)
        .map(|(employee, perf)| {
            let avg_sale_value = mean(perf.revenue, perf.sale_count);
            EmployeeRecommendation {
                name: employee.name.clone(),
                efficiency: perf.efficiency,
                avg_sale_value,
                recommendation: EmployeeAction::decide(
                    perf.efficiency,
                    average_efficiency,
                    avg_sale_value,
                    perf.sale_count,
                ),
            }
        })
        .filter(|row| row.recommendation != EmployeeAction::NoAction)
        .collect()
}
