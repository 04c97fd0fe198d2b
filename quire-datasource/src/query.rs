//! Collection queries: filters, ordering, paging and text search.

use indexmap::IndexMap;
use quire_model::{Entity, EntityValues};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Comparison operator of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhereOp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "array-contains")]
    ArrayContains,
    #[serde(rename = "array-contains-any")]
    ArrayContainsAny,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not-in")]
    NotIn,
}

impl WhereOp {
    /// Whether `field` satisfies `op operand`. Missing fields compare as `null`.
    pub fn matches(self, field: &Value, operand: &Value) -> bool {
        match self {
            Self::Eq => field == operand,
            Self::Ne => field != operand,
            Self::Lt => same_kind(field, operand) && compare_values(field, operand) == Ordering::Less,
            Self::Le => same_kind(field, operand) && compare_values(field, operand) != Ordering::Greater,
            Self::Gt => same_kind(field, operand) && compare_values(field, operand) == Ordering::Greater,
            Self::Ge => same_kind(field, operand) && compare_values(field, operand) != Ordering::Less,
            Self::ArrayContains => field.as_array().is_some_and(|items| items.contains(operand)),
            Self::ArrayContainsAny => match (field.as_array(), operand.as_array()) {
                (Some(items), Some(candidates)) => candidates.iter().any(|c| items.contains(c)),
                _ => false,
            },
            Self::In => operand.as_array().is_some_and(|candidates| candidates.contains(field)),
            Self::NotIn => operand.as_array().is_some_and(|candidates| !candidates.contains(field)),
        }
    }
}

/// Filter clauses keyed by property, all of which must match.
pub type FilterValues = IndexMap<String, (WhereOp, Value)>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Parameters of a collection fetch or listen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionQuery {
    pub path: String,
    pub filter: FilterValues,
    pub limit: Option<usize>,
    /// Id of the last entity of the previous page.
    pub start_after: Option<String>,
    pub order_by: Option<String>,
    pub order: SortOrder,
    /// Case-insensitive substring match over string values.
    pub search: Option<String>,
}

impl CollectionQuery {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, key: impl Into<String>, op: WhereOp, value: Value) -> Self {
        self.filter.insert(key.into(), (op, value));
        self
    }

    pub fn with_order(mut self, order_by: impl Into<String>, order: SortOrder) -> Self {
        self.order_by = Some(order_by.into());
        self.order = order;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_start_after(mut self, entity_id: impl Into<String>) -> Self {
        self.start_after = Some(entity_id.into());
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Whether `values` pass the filter and search of this query.
    pub fn accepts(&self, values: &EntityValues) -> bool {
        let filtered = self.filter.iter().all(|(key, (op, operand))| {
            let field = values.get(key).unwrap_or(&Value::Null);
            op.matches(field, operand)
        });
        filtered && self.search.as_deref().is_none_or(|text| search_matches(values, text))
    }

    /// Applies filter, search, ordering, cursor and limit to `entities`.
    pub fn apply(&self, entities: impl IntoIterator<Item = Entity>) -> Vec<Entity> {
        let mut result: Vec<Entity> = entities.into_iter().filter(|e| self.accepts(&e.values)).collect();
        if let Some(order_by) = &self.order_by {
            result.sort_by(|a, b| {
                let ordering = compare_values(
                    a.values.get(order_by).unwrap_or(&Value::Null),
                    b.values.get(order_by).unwrap_or(&Value::Null),
                );
                match self.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }
        if let Some(cursor) = &self.start_after {
            match result.iter().position(|e| &e.id == cursor) {
                Some(index) => {
                    result.drain(..=index);
                }
                None => result.clear(),
            }
        }
        if let Some(limit) = self.limit {
            result.truncate(limit);
        }
        result
    }
}

fn search_matches(values: &EntityValues, text: &str) -> bool {
    let needle = text.to_lowercase();
    values
        .values()
        .any(|v| v.as_str().is_some_and(|s| s.to_lowercase().contains(&needle)))
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn same_kind(a: &Value, b: &Value) -> bool {
    kind_rank(a) == kind_rank(b)
}

/// Total order over JSON values: null < bool < number < string < array < object,
/// then natural order within a kind.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(x, y)| compare_values(x, y))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}
