use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_dynamodb::model::AttributeValue;
use aws_sdk_dynamodb::types::SdkError;
use service_core::ddb::get_item::{GetItem, GetItemInput};
use service_core::ddb::put_item::{PutItem, PutItemInput};
use service_core::ddb::query::{Query, QueryInput};
use service_core::ddb::scan::{Scan, ScanInput};
use service_core::ddb::update_item::{UpdateItem, UpdateItemInput};

use crate::config::{MapperConfig, SaveBehavior};
use crate::error::MapperError;
use crate::expression::{non_empty, QueryExpression, SaveExpression, ScanExpression};
use crate::item::{key_of, DdbItem, Item};
use crate::pagination::{PaginatedList, QueryResultPage, ScanResultPage};

/// Object mapper for items of type `T`.
///
/// Only the fully parameterised operations have to be implemented; the shorter forms fill in
/// `MapperConfig::default()` and an empty [`SaveExpression`].
#[async_trait]
pub trait Mapper<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    async fn save(&self, item: &T) -> Result<(), MapperError> {
        let expression = SaveExpression::default();
        let config = MapperConfig::default();
        self.save_with_expression_and_config(item, &expression, &config).await
    }

    async fn save_with_config(&self, item: &T, config: &MapperConfig) -> Result<(), MapperError> {
        let expression = SaveExpression::default();
        self.save_with_expression_and_config(item, &expression, config).await
    }

    async fn save_with_expression(&self, item: &T, expression: &SaveExpression) -> Result<(), MapperError> {
        let config = MapperConfig::default();
        self.save_with_expression_and_config(item, expression, &config).await
    }

    async fn save_with_expression_and_config(
        &self,
        item: &T,
        expression: &SaveExpression,
        config: &MapperConfig,
    ) -> Result<(), MapperError>;

    /// Loads the stored version of `key_object`, looked up by the key attributes it carries.
    async fn load(&self, key_object: &T) -> Result<Option<T>, MapperError> {
        let config = MapperConfig::default();
        self.load_with_config(key_object, &config).await
    }

    async fn load_with_config(&self, key_object: &T, config: &MapperConfig) -> Result<Option<T>, MapperError>;

    async fn load_by_hash_key(&self, hash_key: AttributeValue) -> Result<Option<T>, MapperError> {
        let config = MapperConfig::default();
        self.load_by_keys(hash_key, None, &config).await
    }

    async fn load_by_hash_and_range_key(
        &self,
        hash_key: AttributeValue,
        range_key: AttributeValue,
    ) -> Result<Option<T>, MapperError> {
        let config = MapperConfig::default();
        self.load_by_keys(hash_key, Some(range_key), &config).await
    }

    async fn load_by_hash_key_with_config(
        &self,
        hash_key: AttributeValue,
        config: &MapperConfig,
    ) -> Result<Option<T>, MapperError> {
        self.load_by_keys(hash_key, None, config).await
    }

    async fn load_by_hash_and_range_key_with_config(
        &self,
        hash_key: AttributeValue,
        range_key: AttributeValue,
        config: &MapperConfig,
    ) -> Result<Option<T>, MapperError> {
        self.load_by_keys(hash_key, Some(range_key), config).await
    }

    async fn load_by_keys(
        &self,
        hash_key: AttributeValue,
        range_key: Option<AttributeValue>,
        config: &MapperConfig,
    ) -> Result<Option<T>, MapperError>;

    async fn query(&self, expression: &QueryExpression) -> Result<PaginatedList<T>, MapperError> {
        let config = MapperConfig::default();
        self.query_with_config(expression, &config).await
    }

    async fn query_with_config(
        &self,
        expression: &QueryExpression,
        config: &MapperConfig,
    ) -> Result<PaginatedList<T>, MapperError>;

    async fn query_page(&self, expression: &QueryExpression) -> Result<QueryResultPage<T>, MapperError> {
        let config = MapperConfig::default();
        self.query_page_with_config(expression, &config).await
    }

    async fn query_page_with_config(
        &self,
        expression: &QueryExpression,
        config: &MapperConfig,
    ) -> Result<QueryResultPage<T>, MapperError>;

    async fn scan(&self, expression: &ScanExpression) -> Result<PaginatedList<T>, MapperError> {
        let config = MapperConfig::default();
        self.scan_with_config(expression, &config).await
    }

    async fn scan_with_config(
        &self,
        expression: &ScanExpression,
        config: &MapperConfig,
    ) -> Result<PaginatedList<T>, MapperError>;

    async fn scan_page(&self, expression: &ScanExpression) -> Result<ScanResultPage<T>, MapperError> {
        let config = MapperConfig::default();
        self.scan_page_with_config(expression, &config).await
    }

    async fn scan_page_with_config(
        &self,
        expression: &ScanExpression,
        config: &MapperConfig,
    ) -> Result<ScanResultPage<T>, MapperError>;
}

pub trait ThreadSafeDdbClient: GetItem + PutItem + UpdateItem + Query + Scan + Send + Sync {}
impl<C: GetItem + PutItem + UpdateItem + Query + Scan + Send + Sync> ThreadSafeDdbClient for C {}

/// [`Mapper`] for every [`DdbItem`], on top of the raw operations of `C`.
#[derive(Clone, Debug)]
pub struct DdbMapper<C: ThreadSafeDdbClient> {
    ddb: C,
}

/// Logs a failed raw call before handing its error to the caller.
fn logged<E>(operation: &'static str) -> impl FnOnce(SdkError<E>) -> MapperError
where
    E: Debug,
    MapperError: From<SdkError<E>>,
{
    move |e| {
        tracing::error!(error = ?e, "DynamoDB {} failed.", operation);
        e.into()
    }
}

fn decode<T: DdbItem>(items: Option<Vec<Item>>) -> Result<Vec<T>, MapperError> {
    // Items are absent altogether when the request only selected the count.
    items.unwrap_or_default().into_iter().map(T::from_item).collect()
}

/// Returns the key the next page starts from, or `None` after the last page.
fn next_start_key(current: &Option<Item>, last_evaluated_key: Option<Item>) -> Result<Option<Item>, MapperError> {
    match last_evaluated_key.filter(|key| !key.is_empty()) {
        None => Ok(None),
        Some(key) if current.as_ref() == Some(&key) => Err(MapperError::MalformedResponse("pagination did not advance")),
        Some(key) => Ok(Some(key)),
    }
}

impl<C: ThreadSafeDdbClient> DdbMapper<C> {
    pub fn new(ddb: C) -> Self {
        Self { ddb }
    }

    async fn put(&self, table_name: String, item: Item, expression: &SaveExpression) -> Result<(), MapperError> {
        let put_item_input = PutItemInput::builder()
            .table_name(table_name)
            .item(item)
            .condition_expression(expression.condition_expression.clone())
            .expression_attribute_names(non_empty(expression.expression_attribute_names.clone()))
            .expression_attribute_values(non_empty(expression.expression_attribute_values.clone()))
            .build();
        self.ddb.put_item(put_item_input).await.map_err(logged("PutItem"))?;
        Ok(())
    }

    async fn get<T: DdbItem>(&self, key: Item, config: &MapperConfig) -> Result<Option<T>, MapperError> {
        let get_item_input = GetItemInput::builder()
            .table_name(config.table_name(T::table_name()))
            .key(key)
            .consistent_read(config.consistent_read())
            .build();
        let output = self.ddb.get_item(get_item_input).await.map_err(logged("GetItem"))?;

        output.item.map(T::from_item).transpose()
    }

    fn query_input<T: DdbItem>(
        expression: &QueryExpression,
        config: &MapperConfig,
        exclusive_start_key: Option<Item>,
    ) -> QueryInput {
        QueryInput::builder()
            .table_name(config.table_name(T::table_name()))
            .index_name(expression.index_name.clone())
            .limit(expression.limit)
            .select(expression.select.clone())
            .exclusive_start_key(exclusive_start_key)
            .scan_index_forward(expression.scan_index_forward)
            .key_condition_expression(expression.key_condition_expression.clone())
            .projection_expression(expression.projection_expression.clone())
            .filter_expression(expression.filter_expression.clone())
            .expression_attribute_names(non_empty(expression.expression_attribute_names.clone()))
            .expression_attribute_values(non_empty(expression.expression_attribute_values.clone()))
            .consistent_read(expression.consistent_read || config.consistent_read())
            .build()
    }

    fn scan_input<T: DdbItem>(
        expression: &ScanExpression,
        config: &MapperConfig,
        exclusive_start_key: Option<Item>,
    ) -> ScanInput {
        ScanInput::builder()
            .table_name(config.table_name(T::table_name()))
            .index_name(expression.index_name.clone())
            .limit(expression.limit)
            .select(expression.select.clone())
            .exclusive_start_key(exclusive_start_key)
            .projection_expression(expression.projection_expression.clone())
            .filter_expression(expression.filter_expression.clone())
            .expression_attribute_names(non_empty(expression.expression_attribute_names.clone()))
            .expression_attribute_values(non_empty(expression.expression_attribute_values.clone()))
            .consistent_read(expression.consistent_read || config.consistent_read())
            .segment(expression.segment.map(|(segment, _)| segment))
            .total_segments(expression.segment.map(|(_, total)| total))
            .build()
    }
}

/// Turns the non-key attributes of an item into an update request.
///
/// Attributes set to `Null` are removed from the stored item; every other attribute is set.
/// The placeholders are numbered in attribute name order so the request is stable, skipping
/// numbers whose placeholders the save expression already uses. An item with no non-key
/// attributes yields a request without update expression, which leaves the stored item as is.
fn update_input(table_name: String, key: Item, attributes: Item, expression: &SaveExpression) -> UpdateItemInput {
    let mut names = expression.expression_attribute_names.clone();
    let mut values = expression.expression_attribute_values.clone();

    let mut attributes: Vec<_> = attributes.into_iter().collect();
    attributes.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut set = Vec::new();
    let mut remove = Vec::new();
    let mut next = 0;
    for (name, value) in attributes {
        while names.contains_key(&format!("#mapper_a{}", next)) || values.contains_key(&format!(":mapper_v{}", next)) {
            next += 1;
        }
        let name_placeholder = format!("#mapper_a{}", next);
        if let AttributeValue::Null(_) = value {
            remove.push(name_placeholder.clone());
        } else {
            let value_placeholder = format!(":mapper_v{}", next);
            set.push(format!("{} = {}", name_placeholder, value_placeholder));
            values.insert(value_placeholder, value);
        }
        names.insert(name_placeholder, name);
        next += 1;
    }

    let mut clauses = Vec::new();
    if !set.is_empty() {
        clauses.push(format!("SET {}", set.join(", ")));
    }
    if !remove.is_empty() {
        clauses.push(format!("REMOVE {}", remove.join(", ")));
    }

    let mut update_item_input = UpdateItemInput::builder()
        .table_name(table_name)
        .key(key)
        .condition_expression(expression.condition_expression.clone())
        .expression_attribute_names(non_empty(names))
        .expression_attribute_values(non_empty(values))
        .build();
    if !clauses.is_empty() {
        update_item_input.update_expression = Some(clauses.join(" "));
    }
    update_item_input
}

#[async_trait]
impl<C, T> Mapper<T> for DdbMapper<C>
where
    C: ThreadSafeDdbClient,
    T: DdbItem + Send + Sync + 'static,
{
    async fn save_with_expression_and_config(
        &self,
        item: &T,
        expression: &SaveExpression,
        config: &MapperConfig,
    ) -> Result<(), MapperError> {
        let table_name = config.table_name(T::table_name());

        match config.save_behavior {
            SaveBehavior::Clobber => self.put(table_name, item.to_item(), expression).await,
            SaveBehavior::Update => {
                let key = item.key()?;
                let mut attributes = item.to_item();
                attributes.retain(|name, _| !key.contains_key(name));

                let update_item_input = update_input(table_name, key, attributes, expression);
                self.ddb
                    .update_item(update_item_input)
                    .await
                    .map_err(logged("UpdateItem"))?;
                Ok(())
            }
        }
    }

    async fn load_with_config(&self, key_object: &T, config: &MapperConfig) -> Result<Option<T>, MapperError> {
        let key = key_object.key()?;
        self.get(key, config).await
    }

    async fn load_by_keys(
        &self,
        hash_key: AttributeValue,
        range_key: Option<AttributeValue>,
        config: &MapperConfig,
    ) -> Result<Option<T>, MapperError> {
        let key = key_of::<T>(hash_key, range_key)?;
        self.get(key, config).await
    }

    async fn query_with_config(
        &self,
        expression: &QueryExpression,
        config: &MapperConfig,
    ) -> Result<PaginatedList<T>, MapperError> {
        let mut results = Vec::new();
        let mut pages = 0;
        let mut start_key = expression.exclusive_start_key.clone();

        loop {
            let query_input = Self::query_input::<T>(expression, config, start_key.clone());
            let output = self.ddb.query(query_input).await.map_err(logged("Query"))?;
            pages += 1;
            results.extend(decode::<T>(output.items)?);

            match next_start_key(&start_key, output.last_evaluated_key)? {
                None => break,
                next => start_key = next,
            }
        }

        tracing::debug!(table_name = T::table_name(), pages, count = results.len(), "Query complete");
        Ok(PaginatedList::new(results, pages))
    }

    async fn query_page_with_config(
        &self,
        expression: &QueryExpression,
        config: &MapperConfig,
    ) -> Result<QueryResultPage<T>, MapperError> {
        let query_input = Self::query_input::<T>(expression, config, expression.exclusive_start_key.clone());
        let output = self.ddb.query(query_input).await.map_err(logged("Query"))?;

        Ok(QueryResultPage {
            results: decode::<T>(output.items)?,
            last_evaluated_key: output.last_evaluated_key,
            count: output.count,
            scanned_count: output.scanned_count,
        })
    }

    async fn scan_with_config(
        &self,
        expression: &ScanExpression,
        config: &MapperConfig,
    ) -> Result<PaginatedList<T>, MapperError> {
        let mut results = Vec::new();
        let mut pages = 0;
        let mut start_key = expression.exclusive_start_key.clone();

        loop {
            let scan_input = Self::scan_input::<T>(expression, config, start_key.clone());
            let output = self.ddb.scan(scan_input).await.map_err(logged("Scan"))?;
            pages += 1;
            results.extend(decode::<T>(output.items)?);

            match next_start_key(&start_key, output.last_evaluated_key)? {
                None => break,
                next => start_key = next,
            }
        }

        tracing::debug!(table_name = T::table_name(), pages, count = results.len(), "Scan complete");
        Ok(PaginatedList::new(results, pages))
    }

    async fn scan_page_with_config(
        &self,
        expression: &ScanExpression,
        config: &MapperConfig,
    ) -> Result<ScanResultPage<T>, MapperError> {
        let scan_input = Self::scan_input::<T>(expression, config, expression.exclusive_start_key.clone());
        let output = self.ddb.scan(scan_input).await.map_err(logged("Scan"))?;

        Ok(ScanResultPage {
            results: decode::<T>(output.items)?,
            last_evaluated_key: output.last_evaluated_key,
            count: output.count,
            scanned_count: output.scanned_count,
        })
    }
}
