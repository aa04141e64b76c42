use std::{sync::Arc, time::Duration};

use blockmirror_document_client::notion::NotionClient;
use blockmirror_enrichment::BlockEnrichmentPipeline;
use blockmirror_objects_store::memory_store::MemoryObjectsStore;
use blockmirror_server::{api::build_server, state::ApiState};
use blockmirror_uploader::{
    image_source::{HttpImageSource, DEFAULT_MAX_IMAGE_BYTES},
    ContentAddressedUploader,
};
use tokio::runtime::Runtime;

pub const BUCKET: &str = "blockmirror-test";
pub const REGION: &str = "ap-northeast-2";
pub const TOKEN: &str = "secret_test_token";

/// A server bound to an ephemeral port, talking HTTP to `notion_base_url`
/// for documents and images and keeping objects in memory.
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryObjectsStore>,
}

pub fn start_server(runtime: &Runtime, notion_base_url: String) -> TestServer {
    let store = Arc::new(MemoryObjectsStore::new(BUCKET, REGION));
    let timeout = Duration::from_secs(5);
    let documents = NotionClient::new(notion_base_url, TOKEN.to_string(), timeout);
    let uploader = ContentAddressedUploader::new(
        Arc::new(HttpImageSource::new(timeout, DEFAULT_MAX_IMAGE_BYTES)),
        store.clone(),
    );
    let state = ApiState::new(BlockEnrichmentPipeline::new(
        Arc::new(documents),
        Arc::new(uploader),
    ));

    let port = runtime.block_on(async {
        let (server, port) = build_server(state, ("127.0.0.1", 0)).unwrap();
        tokio::spawn(server);
        port
    });
    std::thread::sleep(Duration::from_millis(200));

    TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        store,
    }
}
