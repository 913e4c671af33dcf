use crate::assistant::Assistant;
use crate::models::AppData;
use crate::sop::SopDocument;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub assistant: Arc<dyn Assistant>,
    pub sop: Arc<Option<SopDocument>>,
}

impl AppState {
    pub fn new(
        data_path: PathBuf,
        data: AppData,
        assistant: Arc<dyn Assistant>,
        sop: Option<SopDocument>,
    ) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            assistant,
            sop: Arc::new(sop),
        }
    }
}
