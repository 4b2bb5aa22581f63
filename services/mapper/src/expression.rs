//! Conditions and filters handed to the mapper along with a save, query or scan.

use std::collections::HashMap;

use aws_sdk_dynamodb::model::{AttributeValue, Select};
use typed_builder::TypedBuilder;

use crate::item::Item;

/// Condition a save must satisfy. The default expression has no condition.
#[derive(Clone, Debug, Default, PartialEq, TypedBuilder)]
pub struct SaveExpression {
    #[builder(default, setter(strip_option, into))]
    pub condition_expression: Option<String>,

    #[builder(default)]
    pub expression_attribute_names: HashMap<String, String>,

    #[builder(default)]
    pub expression_attribute_values: HashMap<String, AttributeValue>,
}

#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct QueryExpression {
    #[builder(setter(into))]
    pub key_condition_expression: String,

    #[builder(default, setter(strip_option, into))]
    pub filter_expression: Option<String>,

    #[builder(default, setter(strip_option, into))]
    pub index_name: Option<String>,

    /// Page size. Queries returning a [`PaginatedList`](crate::pagination::PaginatedList) still
    /// fetch every page.
    #[builder(default, setter(strip_option))]
    pub limit: Option<i32>,

    #[builder(default = true)]
    pub scan_index_forward: bool,

    #[builder(default = false)]
    pub consistent_read: bool,

    #[builder(default, setter(strip_option))]
    pub exclusive_start_key: Option<Item>,

    #[builder(default, setter(strip_option))]
    pub select: Option<Select>,

    #[builder(default, setter(strip_option, into))]
    pub projection_expression: Option<String>,

    #[builder(default)]
    pub expression_attribute_names: HashMap<String, String>,

    #[builder(default)]
    pub expression_attribute_values: HashMap<String, AttributeValue>,
}

#[derive(Clone, Debug, Default, PartialEq, TypedBuilder)]
pub struct ScanExpression {
    #[builder(default, setter(strip_option, into))]
    pub filter_expression: Option<String>,

    #[builder(default, setter(strip_option, into))]
    pub index_name: Option<String>,

    #[builder(default, setter(strip_option))]
    pub limit: Option<i32>,

    #[builder(default = false)]
    pub consistent_read: bool,

    #[builder(default, setter(strip_option))]
    pub exclusive_start_key: Option<Item>,

    #[builder(default, setter(strip_option))]
    pub select: Option<Select>,

    #[builder(default, setter(strip_option, into))]
    pub projection_expression: Option<String>,

    #[builder(default)]
    pub expression_attribute_names: HashMap<String, String>,

    #[builder(default)]
    pub expression_attribute_values: HashMap<String, AttributeValue>,

    /// Parallel scan position, as `(segment, total_segments)`.
    #[builder(default, setter(strip_option))]
    pub segment: Option<(i32, i32)>,
}

/// DynamoDB rejects empty name/value maps, so empty ones are not sent at all.
pub(crate) fn non_empty<K, V>(map: HashMap<K, V>) -> Option<HashMap<K, V>> {
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}
