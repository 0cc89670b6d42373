use crate::catalog::Catalog;
use crate::models::StoreData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub catalog: Arc<Catalog>,
    pub data: Arc<Mutex<StoreData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, catalog: Catalog, data: StoreData) -> Self {
        Self {
            data_path,
            catalog: Arc::new(catalog),
            data: Arc::new(Mutex::new(data)),
        }
    }
}
