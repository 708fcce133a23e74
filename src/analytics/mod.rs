//! Analytics - pure computations over a [`Snapshot`].
//!
//! Records are first projected into typed views ([`Dataset`]); the three
//! report builders then work on those views only. Nothing here touches the
//! store.
//!
//! ## Example
//!
//! ```ignore
//! use shop_analytics::analytics::{descriptive, predictive, prescriptive, Dataset};
//!
//! let data = Dataset::from_snapshot(&snapshot);
//! let summary = descriptive::report(&data);
//! let forecast = predictive::report(&data, chrono::Local::now().date_naive());
//! let actions = prescriptive::report(&data);
//! ```

pub mod descriptive;
pub mod predictive;
pub mod prescriptive;
pub mod regression;

use chrono::{DateTime, NaiveDate};

use crate::collection::{record_id, Record, RecordExt, Snapshot};

/// Days of sales history the per-product velocity is averaged over.
pub const OBSERVATION_WINDOW_DAYS: f64 = 10.0;

/// Days covered by every forward-looking projection.
pub const PROJECTION_DAYS: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub cost: f64,
    pub stock: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Option<i64>,
    pub name: String,
    pub age: Option<f64>,
    pub total_spent: f64,
    pub total_purchases: f64,
    pub join_date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    pub id: Option<i64>,
    pub product_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub quantity: f64,
    pub total: f64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: Option<i64>,
    pub name: String,
    pub salary: f64,
}

impl From<&Record> for Product {
    fn from(r: &Record) -> Self {
        Self {
            id: record_id(r),
            name: r.text("name").to_string(),
            category: r.text("category").to_string(),
            price: r.number("price"),
            cost: r.number("cost"),
            stock: r.number("stock"),
        }
    }
}

impl From<&Record> for Customer {
    fn from(r: &Record) -> Self {
        Self {
            id: record_id(r),
            name: r.text("name").to_string(),
            age: r.optional_number("age"),
            total_spent: r.number("totalSpent"),
            total_purchases: r.number("totalPurchases"),
            join_date: r.text("joinDate").to_string(),
        }
    }
}

impl From<&Record> for Sale {
    fn from(r: &Record) -> Self {
        Self {
            id: record_id(r),
            product_id: r.integer("productId"),
            customer_id: r.integer("customerId"),
            employee_id: r.integer("employeeId"),
            quantity: r.number("quantity"),
            total: r.number("total"),
            date: r.text("date").to_string(),
        }
    }
}

impl From<&Record> for Employee {
    fn from(r: &Record) -> Self {
        Self {
            id: record_id(r),
            name: r.text("name").to_string(),
            salary: r.number("salary"),
        }
    }
}

/// Typed projection of a snapshot. Inventory records carry no fields the
/// reports read, so they are not projected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub sales: Vec<Sale>,
    pub employees: Vec<Employee>,
}

impl Dataset {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            products: snapshot.products.iter().map(Product::from).collect(),
            customers: snapshot.customers.iter().map(Customer::from).collect(),
            sales: snapshot.sales.iter().map(Sale::from).collect(),
            employees: snapshot.employees.iter().map(Employee::from).collect(),
        }
    }

    /// First product with the given id. Unmatched or missing references are
    /// absent.
    pub fn product(&self, id: Option<i64>) -> Option<&Product> {
        id.and_then(|id| self.products.iter().find(|p| p.id == Some(id)))
    }

    pub fn sales_of_product(&self, product: &Product) -> impl Iterator<Item = &Sale> + '_ {
        let id = product.id;
        self.sales
            .iter()
            .filter(move |s| id.is_some() && s.product_id == id)
    }

    pub fn sales_to_customer(&self, customer: &Customer) -> impl Iterator<Item = &Sale> + '_ {
        let id = customer.id;
        self.sales
            .iter()
            .filter(move |s| id.is_some() && s.customer_id == id)
    }

    pub fn sales_by_employee(&self, employee: &Employee) -> impl Iterator<Item = &Sale> + '_ {
        let id = employee.id;
        self.sales
            .iter()
            .filter(move |s| id.is_some() && s.employee_id == id)
    }
}

/// Units of a product sold per day, averaged over the observation window.
pub(crate) fn average_daily_units(data: &Dataset, product: &Product) -> f64 {
    let units = total(data.sales_of_product(product).map(|s| s.quantity));
    units / OBSERVATION_WINDOW_DAYS
}

/// Parse a `YYYY-MM-DD` date, or the date part of an RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Sum that is `0.0` (not `-0.0`) when there is nothing to add.
pub(crate) fn total(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc, v| acc + v)
}

/// `sum / count`, 0 when `count` is 0.
pub(crate) fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
