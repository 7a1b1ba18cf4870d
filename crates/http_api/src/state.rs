use std::sync::Arc;

use cur_report::ReportConfig;
use cur_store::ObjectStore;

#[derive(Clone)]
pub struct HttpState {
    pub store: Arc<dyn ObjectStore>,
    pub config: ReportConfig,
    pub api_key: String,
}

impl HttpState {
    pub fn new(store: Arc<dyn ObjectStore>, config: ReportConfig, api_key: String) -> Self {
        Self {
            store,
            config,
            api_key,
        }
    }
}
