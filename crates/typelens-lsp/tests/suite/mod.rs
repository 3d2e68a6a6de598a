use std::sync::Arc;

use typelens_config::QueryConfig;
use typelens_lsp::{LocalSender, QueryService, TypeLensClient, TypeLensServer};
use typelens_test_utils::{fixture_resolver, PROJECT_URI};

mod client;
mod dispatch;

pub(crate) fn fixture_server() -> TypeLensServer {
    TypeLensServer::new(QueryService::new(fixture_resolver(), QueryConfig::default()))
}

pub(crate) fn fixture_client() -> TypeLensClient {
    TypeLensClient::new(Arc::new(LocalSender::new(fixture_server())), PROJECT_URI)
}
