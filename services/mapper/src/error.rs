use aws_sdk_dynamodb::error::{
    GetItemError, PutItemError, PutItemErrorKind, QueryError, ScanError, UpdateItemError, UpdateItemErrorKind,
};
use aws_sdk_dynamodb::types::SdkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapperError {
    #[error(transparent)]
    GetItem(#[from] SdkError<GetItemError>),

    #[error(transparent)]
    PutItem(#[from] SdkError<PutItemError>),

    #[error(transparent)]
    UpdateItem(#[from] SdkError<UpdateItemError>),

    #[error(transparent)]
    Query(#[from] SdkError<QueryError>),

    #[error(transparent)]
    Scan(#[from] SdkError<ScanError>),

    #[error("Attribute {0:?} is missing.")]
    MissingAttribute(String),

    #[error("Attribute {name:?} is not a valid {expected}.")]
    InvalidAttribute { name: String, expected: &'static str },

    #[error("Malformed reply: {0}")]
    MalformedResponse(&'static str),
}

impl MapperError {
    /// Whether a save was rejected because its condition expression did not hold.
    pub fn is_conditional_check_failed(&self) -> bool {
        match self {
            Self::PutItem(SdkError::ServiceError {
                err:
                    PutItemError {
                        kind: PutItemErrorKind::ConditionalCheckFailedException(_),
                        ..
                    },
                ..
            }) => true,
            Self::UpdateItem(SdkError::ServiceError {
                err:
                    UpdateItemError {
                        kind: UpdateItemErrorKind::ConditionalCheckFailedException(_),
                        ..
                    },
                ..
            }) => true,
            _ => false,
        }
    }

    pub(crate) fn invalid(name: &str, expected: &'static str) -> Self {
        Self::InvalidAttribute {
            name: name.to_owned(),
            expected,
        }
    }
}
