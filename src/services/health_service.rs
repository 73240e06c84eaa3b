use crate::models::StoreStatus;
use crate::utils::Database;
use log::warn;

// Report whether the backing store is reachable and what it holds
pub fn store_status(db: &Database) -> StoreStatus {
    let mut status = StoreStatus {
        backend: "running".to_string(),
        database: "not connected".to_string(),
        collections: Vec::new(),
    };

    if !db.is_configured() {
        return status;
    }

    match db.collection_names() {
        Ok(collections) => {
            status.database = "connected".to_string();
            status.collections = collections;
        }
        Err(e) => {
            warn!("Store health check failed: {}", e);
            status.database = format!("error: {}", e);
        }
    }

    status
}
