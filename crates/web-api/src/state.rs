use std::{path::PathBuf, sync::Arc};

use application::ResourceService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ResourceService>,
    /// `/app` 下提供的静态文件目录
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(service: Arc<ResourceService>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            service,
            static_dir: static_dir.into(),
        }
    }
}
