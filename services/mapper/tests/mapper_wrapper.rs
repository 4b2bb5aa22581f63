use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::UpdateItemError;
use aws_sdk_dynamodb::model::AttributeValue;
use aws_sdk_dynamodb::output::UpdateItemOutput;
use aws_sdk_dynamodb::types::SdkError;
use ddb_mapper::{
    ConsistentReads, KeyValue, Mapper, MapperConfig, MapperError, MapperWrapper, PaginatedList, QueryExpression,
    QueryResultPage, SaveBehavior, SaveExpression, ScanExpression, ScanResultPage,
};
use mockall::mock;
use service_core::ddb::update_item::{UpdateItem, UpdateItemInput};

#[derive(Clone, Debug, PartialEq)]
struct Widget {
    id: String,
    size: u32,
}

mock! {
    ObjectMapper {}

    #[async_trait]
    impl Mapper<Widget> for ObjectMapper {
        async fn save(&self, item: &Widget) -> Result<(), MapperError>;
        async fn save_with_config(&self, item: &Widget, config: &MapperConfig) -> Result<(), MapperError>;
        async fn save_with_expression(&self, item: &Widget, expression: &SaveExpression) -> Result<(), MapperError>;
        async fn save_with_expression_and_config(
            &self,
            item: &Widget,
            expression: &SaveExpression,
            config: &MapperConfig,
        ) -> Result<(), MapperError>;
        async fn load(&self, key_object: &Widget) -> Result<Option<Widget>, MapperError>;
        async fn load_with_config(&self, key_object: &Widget, config: &MapperConfig) -> Result<Option<Widget>, MapperError>;
        async fn load_by_hash_key(&self, hash_key: AttributeValue) -> Result<Option<Widget>, MapperError>;
        async fn load_by_hash_and_range_key(
            &self,
            hash_key: AttributeValue,
            range_key: AttributeValue,
        ) -> Result<Option<Widget>, MapperError>;
        async fn load_by_hash_key_with_config(
            &self,
            hash_key: AttributeValue,
            config: &MapperConfig,
        ) -> Result<Option<Widget>, MapperError>;
        async fn load_by_hash_and_range_key_with_config(
            &self,
            hash_key: AttributeValue,
            range_key: AttributeValue,
            config: &MapperConfig,
        ) -> Result<Option<Widget>, MapperError>;
        async fn load_by_keys(
            &self,
            hash_key: AttributeValue,
            range_key: Option<AttributeValue>,
            config: &MapperConfig,
        ) -> Result<Option<Widget>, MapperError>;
        async fn query(&self, expression: &QueryExpression) -> Result<PaginatedList<Widget>, MapperError>;
        async fn query_with_config(
            &self,
            expression: &QueryExpression,
            config: &MapperConfig,
        ) -> Result<PaginatedList<Widget>, MapperError>;
        async fn query_page(&self, expression: &QueryExpression) -> Result<QueryResultPage<Widget>, MapperError>;
        async fn query_page_with_config(
            &self,
            expression: &QueryExpression,
            config: &MapperConfig,
        ) -> Result<QueryResultPage<Widget>, MapperError>;
        async fn scan(&self, expression: &ScanExpression) -> Result<PaginatedList<Widget>, MapperError>;
        async fn scan_with_config(
            &self,
            expression: &ScanExpression,
            config: &MapperConfig,
        ) -> Result<PaginatedList<Widget>, MapperError>;
        async fn scan_page(&self, expression: &ScanExpression) -> Result<ScanResultPage<Widget>, MapperError>;
        async fn scan_page_with_config(
            &self,
            expression: &ScanExpression,
            config: &MapperConfig,
        ) -> Result<ScanResultPage<Widget>, MapperError>;
    }
}

mock! {
    LowLevelClient {}

    #[async_trait]
    impl UpdateItem for LowLevelClient {
        async fn update_item(&self, input: UpdateItemInput) -> Result<UpdateItemOutput, SdkError<UpdateItemError>>;
    }
}

type Wrapper = MapperWrapper<MockObjectMapper, MockLowLevelClient>;

fn wrapper(mapper: MockObjectMapper) -> Wrapper {
    MapperWrapper::new(Arc::new(mapper), Arc::new(MockLowLevelClient::new()))
}

fn to_save() -> Widget {
    Widget {
        id: "w-1".to_string(),
        size: 3,
    }
}

fn loaded() -> Widget {
    Widget {
        id: "w-1".to_string(),
        size: 5,
    }
}

fn key() -> AttributeValue {
    "w-1".into_attribute()
}

fn config() -> MapperConfig {
    MapperConfig::builder()
        .save_behavior(SaveBehavior::Clobber)
        .consistent_reads(ConsistentReads::Consistent)
        .build()
}

fn save_expression() -> SaveExpression {
    SaveExpression::builder()
        .condition_expression("attribute_not_exists(Id)")
        .build()
}

fn query_expression() -> QueryExpression {
    QueryExpression::builder()
        .key_condition_expression("Id = :id")
        .expression_attribute_values(HashMap::from([(":id".to_string(), key())]))
        .build()
}

fn scan_expression() -> ScanExpression {
    ScanExpression::builder().filter_expression("Size > :size").limit(10).build()
}

fn query_list() -> PaginatedList<Widget> {
    PaginatedList::new(vec![loaded(), to_save()], 2)
}

fn scan_list() -> PaginatedList<Widget> {
    PaginatedList::new(vec![loaded()], 1)
}

fn query_result_page() -> QueryResultPage<Widget> {
    QueryResultPage {
        results: vec![loaded()],
        last_evaluated_key: Some(HashMap::from([("Id".to_string(), key())])),
        count: 1,
        scanned_count: 3,
    }
}

fn scan_result_page() -> ScanResultPage<Widget> {
    ScanResultPage {
        results: vec![to_save()],
        last_evaluated_key: None,
        count: 1,
        scanned_count: 1,
    }
}

#[tokio::test]
async fn update() {
    let request = UpdateItemInput::builder()
        .table_name("Widgets")
        .key(HashMap::from([("Id".to_string(), key())]))
        .update_expression("SET Size = :size")
        .expression_attribute_values(Some(HashMap::from([(":size".to_string(), 4u32.into_attribute())])))
        .build();
    let mut client = MockLowLevelClient::new();
    let expected = request.clone();
    client
        .expect_update_item()
        .withf(move |input| *input == expected)
        .times(1)
        .returning(|_| Ok(UpdateItemOutput::builder().build()));
    let mapper_wrapper = MapperWrapper::new(Arc::new(MockObjectMapper::new()), Arc::new(client));

    mapper_wrapper.update(request).await.unwrap();
}

#[tokio::test]
async fn update_failure_is_propagated() {
    let mut client = MockLowLevelClient::new();
    client
        .expect_update_item()
        .times(1)
        .returning(|_| Err(SdkError::ConstructionFailure("no region".into())));
    let mapper_wrapper = MapperWrapper::new(Arc::new(MockObjectMapper::new()), Arc::new(client));

    let request = UpdateItemInput::builder()
        .table_name("Widgets")
        .key(HashMap::<String, AttributeValue>::new())
        .update_expression("SET Size = :size")
        .build();
    let result = mapper_wrapper.update(request).await;

    assert!(matches!(result, Err(SdkError::ConstructionFailure(_))));
}

#[tokio::test]
async fn save_object() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_save()
        .withf(|item| *item == to_save())
        .times(1)
        .returning(|_| Ok(()));

    let result = wrapper(mapper).save(to_save()).await.unwrap();

    assert_eq!(result, to_save());
}

#[tokio::test]
async fn save_object_with_config() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_save_with_config()
        .withf(|item, config| *item == to_save() && *config == self::config())
        .times(1)
        .returning(|_, _| Ok(()));

    let result = wrapper(mapper).save_with_config(to_save(), &config()).await.unwrap();

    assert_eq!(result, to_save());
}

#[tokio::test]
async fn save_object_with_save_expression() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_save_with_expression()
        .withf(|item, expression| *item == to_save() && *expression == save_expression())
        .times(1)
        .returning(|_, _| Ok(()));

    let result = wrapper(mapper)
        .save_with_expression(to_save(), &save_expression())
        .await
        .unwrap();

    assert_eq!(result, to_save());
}

#[tokio::test]
async fn save_object_with_config_and_save_expression() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_save_with_expression_and_config()
        .withf(|item, expression, config| {
            *item == to_save() && *expression == save_expression() && *config == self::config()
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let result = wrapper(mapper)
        .save_with_expression_and_config(to_save(), &save_expression(), &config())
        .await
        .unwrap();

    assert_eq!(result, to_save());
}

#[tokio::test]
async fn save_failure_is_propagated() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_save()
        .times(1)
        .returning(|_| Err(MapperError::MissingAttribute("Id".to_string())));

    let result = wrapper(mapper).save(to_save()).await;

    assert!(matches!(result, Err(MapperError::MissingAttribute(name)) if name == "Id"));
}

#[tokio::test]
async fn load_object() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_load()
        .withf(|key_object| *key_object == to_save())
        .times(1)
        .returning(|_| Ok(Some(loaded())));

    let result = wrapper(mapper).load(&to_save()).await.unwrap();

    assert_eq!(result, Some(loaded()));
}

#[tokio::test]
async fn load_missing_object() {
    let mut mapper = MockObjectMapper::new();
    mapper.expect_load().times(1).returning(|_| Ok(None));

    let result = wrapper(mapper).load(&to_save()).await.unwrap();

    assert_eq!(result, None);
}

#[tokio::test]
async fn load_object_with_config() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_load_with_config()
        .withf(|key_object, config| *key_object == to_save() && *config == self::config())
        .times(1)
        .returning(|_, _| Ok(Some(loaded())));

    let result = wrapper(mapper).load_with_config(&to_save(), &config()).await.unwrap();

    assert_eq!(result, Some(loaded()));
}

#[tokio::test]
async fn load_type_with_hash_key() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_load_by_hash_key()
        .withf(|hash_key| *hash_key == key())
        .times(1)
        .returning(|_| Ok(Some(loaded())));

    let result = wrapper(mapper).load_by_hash_key::<Widget>(key()).await.unwrap();

    assert_eq!(result, Some(loaded()));
}

#[tokio::test]
async fn load_type_with_hash_key_and_range_key() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_load_by_hash_and_range_key()
        .withf(|hash_key, range_key| *hash_key == key() && *range_key == key())
        .times(1)
        .returning(|_, _| Ok(Some(loaded())));

    let result = wrapper(mapper)
        .load_by_hash_and_range_key::<Widget>(key(), key())
        .await
        .unwrap();

    assert_eq!(result, Some(loaded()));
}

#[tokio::test]
async fn load_type_with_hash_key_and_config() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_load_by_hash_key_with_config()
        .withf(|hash_key, config| *hash_key == key() && *config == self::config())
        .times(1)
        .returning(|_, _| Ok(None));

    let result = wrapper(mapper)
        .load_by_hash_key_with_config::<Widget>(key(), &config())
        .await
        .unwrap();

    assert_eq!(result, None);
}

#[tokio::test]
async fn load_type_with_hash_key_and_range_key_and_config() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_load_by_hash_and_range_key_with_config()
        .withf(|hash_key, range_key, config| *hash_key == key() && *range_key == key() && *config == self::config())
        .times(1)
        .returning(|_, _, _| Ok(Some(loaded())));

    let result = wrapper(mapper)
        .load_by_hash_and_range_key_with_config::<Widget>(key(), key(), &config())
        .await
        .unwrap();

    assert_eq!(result, Some(loaded()));
}

#[tokio::test]
async fn query_type_with_query_expression() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_query()
        .withf(|expression| *expression == query_expression())
        .times(1)
        .returning(|_| Ok(query_list()));

    let result = wrapper(mapper).query::<Widget>(&query_expression()).await.unwrap();

    assert_eq!(result, query_list());
}

#[tokio::test]
async fn query_type_with_query_expression_and_config() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_query_with_config()
        .withf(|expression, config| *expression == query_expression() && *config == self::config())
        .times(1)
        .returning(|_, _| Ok(query_list()));

    let result = wrapper(mapper)
        .query_with_config::<Widget>(&query_expression(), &config())
        .await
        .unwrap();

    assert_eq!(result, query_list());
}

#[tokio::test]
async fn empty_query_result_is_not_absent() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_query()
        .times(1)
        .returning(|_| Ok(PaginatedList::new(vec![], 1)));

    let result = wrapper(mapper).query::<Widget>(&query_expression()).await.unwrap();

    assert!(result.is_empty());
    assert_eq!(result.pages(), 1);
}

#[tokio::test]
async fn query_page_with_type_and_query_expression() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_query_page()
        .withf(|expression| *expression == query_expression())
        .times(1)
        .returning(|_| Ok(query_result_page()));

    let result = wrapper(mapper).query_page::<Widget>(&query_expression()).await.unwrap();

    assert_eq!(result, query_result_page());
}

#[tokio::test]
async fn query_page_with_type_and_query_expression_and_config() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_query_page_with_config()
        .withf(|expression, config| *expression == query_expression() && *config == self::config())
        .times(1)
        .returning(|_, _| Ok(query_result_page()));

    let result = wrapper(mapper)
        .query_page_with_config::<Widget>(&query_expression(), &config())
        .await
        .unwrap();

    assert_eq!(result, query_result_page());
}

#[tokio::test]
async fn scan_type_with_scan_expression() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_scan()
        .withf(|expression| *expression == scan_expression())
        .times(1)
        .returning(|_| Ok(scan_list()));

    let result = wrapper(mapper).scan::<Widget>(&scan_expression()).await.unwrap();

    assert_eq!(result, scan_list());
}

#[tokio::test]
async fn scan_type_with_scan_expression_and_config() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_scan_with_config()
        .withf(|expression, config| *expression == scan_expression() && *config == self::config())
        .times(1)
        .returning(|_, _| Ok(scan_list()));

    let result = wrapper(mapper)
        .scan_with_config::<Widget>(&scan_expression(), &config())
        .await
        .unwrap();

    assert_eq!(result, scan_list());
}

#[tokio::test]
async fn scan_page_with_type_and_scan_expression() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_scan_page()
        .withf(|expression| *expression == scan_expression())
        .times(1)
        .returning(|_| Ok(scan_result_page()));

    let result = wrapper(mapper).scan_page::<Widget>(&scan_expression()).await.unwrap();

    assert_eq!(result, scan_result_page());
}

#[tokio::test]
async fn scan_page_with_type_and_scan_expression_and_config() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_scan_page_with_config()
        .withf(|expression, config| *expression == scan_expression() && *config == self::config())
        .times(1)
        .returning(|_, _| Ok(scan_result_page()));

    let result = wrapper(mapper)
        .scan_page_with_config::<Widget>(&scan_expression(), &config())
        .await
        .unwrap();

    assert_eq!(result, scan_result_page());
}

#[tokio::test]
async fn scan_failure_is_propagated() {
    let mut mapper = MockObjectMapper::new();
    mapper
        .expect_scan_page()
        .times(1)
        .returning(|_| Err(MapperError::MalformedResponse("missing items")));

    let result = wrapper(mapper).scan_page::<Widget>(&scan_expression()).await;

    assert!(matches!(result, Err(MapperError::MalformedResponse("missing items"))));
}
