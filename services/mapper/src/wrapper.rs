use std::sync::Arc;

use aws_sdk_dynamodb::error::UpdateItemError;
use aws_sdk_dynamodb::model::AttributeValue;
use aws_sdk_dynamodb::types::SdkError;
use service_core::ddb::update_item::{UpdateItem, UpdateItemInput};

use crate::config::MapperConfig;
use crate::error::MapperError;
use crate::expression::{QueryExpression, SaveExpression, ScanExpression};
use crate::mapper::Mapper;
use crate::pagination::{PaginatedList, QueryResultPage, ScanResultPage};

/// Facade over an object mapper `M` and the raw client `C` it runs against.
///
/// Every operation is a single call to the collaborator operation of the same name, with the
/// same arguments. Results and errors are handed back untouched; `save` hands back the item it
/// was given.
pub struct MapperWrapper<M, C> {
    mapper: Arc<M>,
    client: Arc<C>,
}

impl<M, C> Clone for MapperWrapper<M, C> {
    fn clone(&self) -> Self {
        Self {
            mapper: Arc::clone(&self.mapper),
            client: Arc::clone(&self.client),
        }
    }
}

impl<M, C> MapperWrapper<M, C> {
    pub fn new(mapper: Arc<M>, client: Arc<C>) -> Self {
        Self { mapper, client }
    }
}

impl<M, C> MapperWrapper<M, C>
where
    C: UpdateItem,
{
    pub async fn update(&self, input: UpdateItemInput) -> Result<(), SdkError<UpdateItemError>> {
        self.client.update_item(input).await?;
        Ok(())
    }
}

impl<M, C> MapperWrapper<M, C> {
    pub async fn save<T>(&self, item: T) -> Result<T, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.save(&item).await?;
        Ok(item)
    }

    pub async fn save_with_config<T>(&self, item: T, config: &MapperConfig) -> Result<T, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.save_with_config(&item, config).await?;
        Ok(item)
    }

    pub async fn save_with_expression<T>(&self, item: T, expression: &SaveExpression) -> Result<T, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.save_with_expression(&item, expression).await?;
        Ok(item)
    }

    pub async fn save_with_expression_and_config<T>(
        &self,
        item: T,
        expression: &SaveExpression,
        config: &MapperConfig,
    ) -> Result<T, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper
            .save_with_expression_and_config(&item, expression, config)
            .await?;
        Ok(item)
    }

    pub async fn load<T>(&self, key_object: &T) -> Result<Option<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.load(key_object).await
    }

    pub async fn load_with_config<T>(&self, key_object: &T, config: &MapperConfig) -> Result<Option<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.load_with_config(key_object, config).await
    }

    pub async fn load_by_hash_key<T>(&self, hash_key: AttributeValue) -> Result<Option<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.load_by_hash_key(hash_key).await
    }

    pub async fn load_by_hash_and_range_key<T>(
        &self,
        hash_key: AttributeValue,
        range_key: AttributeValue,
    ) -> Result<Option<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.load_by_hash_and_range_key(hash_key, range_key).await
    }

    pub async fn load_by_hash_key_with_config<T>(
        &self,
        hash_key: AttributeValue,
        config: &MapperConfig,
    ) -> Result<Option<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.load_by_hash_key_with_config(hash_key, config).await
    }

    pub async fn load_by_hash_and_range_key_with_config<T>(
        &self,
        hash_key: AttributeValue,
        range_key: AttributeValue,
        config: &MapperConfig,
    ) -> Result<Option<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper
            .load_by_hash_and_range_key_with_config(hash_key, range_key, config)
            .await
    }

    pub async fn query<T>(&self, expression: &QueryExpression) -> Result<PaginatedList<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.query(expression).await
    }

    pub async fn query_with_config<T>(
        &self,
        expression: &QueryExpression,
        config: &MapperConfig,
    ) -> Result<PaginatedList<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.query_with_config(expression, config).await
    }

    pub async fn query_page<T>(&self, expression: &QueryExpression) -> Result<QueryResultPage<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.query_page(expression).await
    }

    pub async fn query_page_with_config<T>(
        &self,
        expression: &QueryExpression,
        config: &MapperConfig,
    ) -> Result<QueryResultPage<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.query_page_with_config(expression, config).await
    }

    pub async fn scan<T>(&self, expression: &ScanExpression) -> Result<PaginatedList<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.scan(expression).await
    }

    pub async fn scan_with_config<T>(
        &self,
        expression: &ScanExpression,
        config: &MapperConfig,
    ) -> Result<PaginatedList<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.scan_with_config(expression, config).await
    }

    pub async fn scan_page<T>(&self, expression: &ScanExpression) -> Result<ScanResultPage<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.scan_page(expression).await
    }

    pub async fn scan_page_with_config<T>(
        &self,
        expression: &ScanExpression,
        config: &MapperConfig,
    ) -> Result<ScanResultPage<T>, MapperError>
    where
        M: Mapper<T>,
        T: Send + Sync + 'static,
    {
        self.mapper.scan_page_with_config(expression, config).await
    }
}
