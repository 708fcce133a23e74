//! Collections - the five named record sets and the document that holds them.
//!
//! Records are loosely typed JSON objects. The only field the store relies on
//! is `id`; everything else is read on demand through [`RecordExt`].
//!
//! ## Example
//!
//! ```ignore
//! use shop_analytics::{Collection, Snapshot};
//!
//! let collection: Collection = "products".parse()?;
//! let snapshot = Snapshot::default();
//! assert!(snapshot.records(collection).is_empty());
//! ```

mod record;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub use record::{record_id, RecordExt};

/// A single loosely-typed record.
pub type Record = Map<String, Value>;

/// One of the fixed record sets held by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Products,
    Customers,
    Sales,
    Employees,
    Inventory,
}

impl Collection {
    /// Every collection, in document order.
    pub const ALL: [Collection; 5] = [
        Collection::Products,
        Collection::Customers,
        Collection::Sales,
        Collection::Employees,
        Collection::Inventory,
    ];

    /// The wire name (`"products"`, `"sales"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Customers => "customers",
            Collection::Sales => "sales",
            Collection::Employees => "employees",
            Collection::Inventory => "inventory",
        }
    }

    /// Human-facing label used by the record browser.
    pub fn label(self) -> &'static str {
        match self {
            Collection::Products => "Products",
            Collection::Customers => "Customers",
            Collection::Sales => "Sales",
            Collection::Employees => "Employees",
            Collection::Inventory => "Inventory",
        }
    }

    /// Wire names of all supported collections.
    pub fn supported() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.name()).collect()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a path segment names no known collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCollection(pub String);

impl fmt::Display for UnknownCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown collection: {}", self.0)
    }
}

impl std::error::Error for UnknownCollection {}

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCollection(s.to_string()))
    }
}

/// The whole document: every collection at a point in time.
///
/// Missing or non-array collection fields load as empty. Top-level fields the
/// dashboard does not know about are kept in `extra` so a read-modify-write
/// cycle does not drop them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient_records")]
    pub products: Vec<Record>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub customers: Vec<Record>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub sales: Vec<Record>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub employees: Vec<Record>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub inventory: Vec<Record>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Snapshot {
    /// Records of one collection, in stored order.
    pub fn records(&self, collection: Collection) -> &[Record] {
        match collection {
            Collection::Products => &self.products,
            Collection::Customers => &self.customers,
            Collection::Sales => &self.sales,
            Collection::Employees => &self.employees,
            Collection::Inventory => &self.inventory,
        }
    }

    /// Mutable access to one collection.
    pub fn records_mut(&mut self, collection: Collection) -> &mut Vec<Record> {
        match collection {
            Collection::Products => &mut self.products,
            Collection::Customers => &mut self.customers,
            Collection::Sales => &mut self.sales,
            Collection::Employees => &mut self.employees,
            Collection::Inventory => &mut self.inventory,
        }
    }
}

/// A collection field that is not an array loads as empty; array elements that
/// are not objects are dropped.
fn lenient_records<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
