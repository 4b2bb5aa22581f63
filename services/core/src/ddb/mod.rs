//! Thin, mockable seam over the raw DynamoDB client.
//!
//! Every raw operation gets its own trait so that consumers only require what they call, and
//! tests can mock each operation separately.

pub mod adapter;
pub mod get_item;
pub mod put_item;
pub mod query;
pub mod scan;
pub mod update_item;

use std::collections::HashMap;

use aws_sdk_dynamodb::model::AttributeValue;

pub use adapter::Adapter;

/// A raw DynamoDB record: attribute name to attribute value.
pub type Item = HashMap<String, AttributeValue>;
