//! Cloud SDK adapter: request-suffix stripping and service normalization.

use crate::naming::{Join, QualifiedNameCache};

use super::accessor::AccessorResolver;
use super::ClientDecorator;

const COMPONENT_NAME: &str = "aws-sdk";

/// Decorator for cloud SDK client operations.
///
/// Request types follow the `<Operation>Request` convention and service
/// identities carry a vendor prefix; the derived resource name strips both,
/// so `PutObjectRequest` against `AmazonStorage` reports as
/// `Storage.PutObject`.
pub struct CloudSdkDecorator<A> {
    cache: QualifiedNameCache,
    accessors: A,
}

impl<A: AccessorResolver> CloudSdkDecorator<A> {
    pub fn new(accessors: A) -> Self {
        let cache = QualifiedNameCache::new(
            |key| key.simple_name.replace("Request", ""),
            Join::suffix(".", |service| service.replace("Amazon", "").trim().to_string()),
        );
        Self { cache, accessors }
    }
}

impl<A: AccessorResolver> ClientDecorator for CloudSdkDecorator<A> {
    fn component(&self) -> &'static str {
        COMPONENT_NAME
    }

    fn tag_prefix(&self) -> &'static str {
        "aws"
    }

    fn cache(&self) -> &QualifiedNameCache {
        &self.cache
    }

    fn accessors(&self) -> &dyn AccessorResolver {
        &self.accessors
    }
}
