//! Conversion between Rust values and raw DynamoDB records.

use std::str::FromStr;

use aws_sdk_dynamodb::model::AttributeValue;
pub use service_core::ddb::Item;
use uuid::Uuid;

use crate::error::MapperError;

/// A type the mapper can store in, and read back from, a DynamoDB table.
pub trait DdbItem: Sized {
    /// Table holding items of this type, before any [`TableNameOverride`](crate::config::TableNameOverride).
    fn table_name() -> &'static str;

    fn hash_key_name() -> &'static str;

    fn range_key_name() -> Option<&'static str> {
        None
    }

    fn to_item(&self) -> Item;

    fn from_item(item: Item) -> Result<Self, MapperError>;

    /// The primary key of this item, i.e. its hash key and range key attributes.
    fn key(&self) -> Result<Item, MapperError> {
        let mut item = self.to_item();
        let mut key = Item::new();
        for name in Some(Self::hash_key_name()).into_iter().chain(Self::range_key_name()) {
            let value = item
                .remove(name)
                .ok_or_else(|| MapperError::MissingAttribute(name.to_owned()))?;
            key.insert(name.to_owned(), value);
        }
        Ok(key)
    }
}

/// Builds the primary key of `T` out of bare key values.
pub(crate) fn key_of<T: DdbItem>(hash_key: AttributeValue, range_key: Option<AttributeValue>) -> Result<Item, MapperError> {
    let mut key = Item::new();
    key.insert(T::hash_key_name().to_owned(), hash_key);
    match (T::range_key_name(), range_key) {
        (Some(name), Some(value)) => {
            key.insert(name.to_owned(), value);
        }
        (Some(name), None) => return Err(MapperError::MissingAttribute(name.to_owned())),
        // A range key for a table without one is ignored, like the table would.
        (None, _) => {}
    }
    Ok(key)
}

/// Values usable as hash or range keys.
pub trait KeyValue {
    fn into_attribute(self) -> AttributeValue;
}

impl KeyValue for AttributeValue {
    fn into_attribute(self) -> AttributeValue {
        self
    }
}

impl KeyValue for String {
    fn into_attribute(self) -> AttributeValue {
        AttributeValue::S(self)
    }
}

impl KeyValue for &str {
    fn into_attribute(self) -> AttributeValue {
        AttributeValue::S(self.to_owned())
    }
}

impl KeyValue for Uuid {
    fn into_attribute(self) -> AttributeValue {
        AttributeValue::S(self.to_string())
    }
}

impl KeyValue for bool {
    fn into_attribute(self) -> AttributeValue {
        AttributeValue::Bool(self)
    }
}

macro_rules! impl_key_value_n {
    ($($type:ty),*) => {
        $(
            impl KeyValue for $type {
                fn into_attribute(self) -> AttributeValue {
                    AttributeValue::N(self.to_string())
                }
            }
        )*
    };
}

impl_key_value_n!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

/// Typed read access to a raw record, for [`DdbItem::from_item`] implementations.
pub struct ItemReader {
    item: Item,
}

impl ItemReader {
    pub fn new(item: Item) -> Self {
        ItemReader { item }
    }

    fn required(&mut self, name: &str) -> Result<AttributeValue, MapperError> {
        self.item
            .remove(name)
            .ok_or_else(|| MapperError::MissingAttribute(name.to_owned()))
    }

    pub fn string(&mut self, name: &str) -> Result<String, MapperError> {
        match self.required(name)? {
            AttributeValue::S(value) => Ok(value),
            _ => Err(MapperError::invalid(name, "string")),
        }
    }

    pub fn optional_string(&mut self, name: &str) -> Result<Option<String>, MapperError> {
        match self.item.remove(name) {
            None | Some(AttributeValue::Null(_)) => Ok(None),
            Some(AttributeValue::S(value)) => Ok(Some(value)),
            Some(_) => Err(MapperError::invalid(name, "string")),
        }
    }

    pub fn number<N: FromStr>(&mut self, name: &str) -> Result<N, MapperError> {
        match self.required(name)? {
            AttributeValue::N(value) => value.parse::<N>().map_err(|_| MapperError::invalid(name, "number")),
            _ => Err(MapperError::invalid(name, "number")),
        }
    }

    pub fn bool(&mut self, name: &str) -> Result<bool, MapperError> {
        match self.required(name)? {
            AttributeValue::Bool(value) => Ok(value),
            _ => Err(MapperError::invalid(name, "bool")),
        }
    }

    pub fn uuid(&mut self, name: &str) -> Result<Uuid, MapperError> {
        let raw = self.string(name)?;
        Uuid::parse_str(&raw).map_err(|_| MapperError::invalid(name, "uuid"))
    }

    pub fn string_set(&mut self, name: &str) -> Result<Vec<String>, MapperError> {
        match self.item.remove(name) {
            None => Ok(Vec::new()),
            Some(AttributeValue::Ss(values)) => Ok(values),
            Some(_) => Err(MapperError::invalid(name, "string set")),
        }
    }

    /// Attributes not consumed by any accessor so far.
    pub fn into_remaining(self) -> Item {
        self.item
    }
}
