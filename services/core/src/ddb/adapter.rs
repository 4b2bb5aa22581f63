use aws_sdk_dynamodb::Client as RawClient;

/// Implements every raw operation trait of this module on top of the AWS SDK client.
///
/// Cloning is cheap: the underlying client is reference counted.
#[derive(Debug, Clone)]
pub struct Adapter {
    pub(crate) raw: RawClient,
}

impl Adapter {
    pub fn new(raw: RawClient) -> Self {
        Adapter { raw }
    }

    /// Escape hatch for operations that have no trait in this module.
    pub fn raw(&self) -> &RawClient {
        &self.raw
    }
}

impl From<RawClient> for Adapter {
    fn from(raw: RawClient) -> Self {
        Adapter::new(raw)
    }
}
