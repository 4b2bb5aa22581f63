//! Object mapping for DynamoDB tables, plus a facade that forwards to a mapper and to the raw
//! client it runs against.

pub mod config;
pub mod context;
pub mod error;
pub mod expression;
pub mod item;
pub mod mapper;
pub mod pagination;
pub mod wrapper;

pub use config::{ConsistentReads, MapperConfig, SaveBehavior, TableNameOverride};
pub use error::MapperError;
pub use expression::{QueryExpression, SaveExpression, ScanExpression};
pub use item::{DdbItem, Item, ItemReader, KeyValue};
pub use mapper::{DdbMapper, Mapper};
pub use pagination::{PaginatedList, QueryResultPage, ScanResultPage};
pub use wrapper::MapperWrapper;
