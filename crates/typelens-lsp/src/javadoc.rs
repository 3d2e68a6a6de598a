use typelens_proto::MarkupContent;
use typelens_types::{JavadocProvider, JavadocTarget};

use crate::TypeLensClient;

/// Fetches javadoc over the wire on every request.
///
/// Failures are logged and reported as "no documentation"; a hover should
/// not fail because the engine is slow.
#[derive(Debug, Clone)]
pub struct RemoteJavadocProvider {
    client: TypeLensClient,
}

impl RemoteJavadocProvider {
    pub fn new(client: TypeLensClient) -> Self {
        Self { client }
    }
}

impl JavadocProvider for RemoteJavadocProvider {
    fn javadoc(&self, target: &JavadocTarget) -> Option<MarkupContent> {
        match self.client.javadoc(&target.binding_key) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!(
                    target: "typelens.lsp",
                    kind = %target.kind,
                    name = %target.name,
                    error = %err,
                    "javadoc request failed"
                );
                None
            }
        }
    }
}
