use std::sync::Arc;

use type_map::concurrent::TypeMap;

use crate::auth::AdminKey;
use crate::error::{self, AddCode};

pub struct ServiceState {
    pub repositories: TypeMap,
    pub admin_key: AdminKey,
}

impl ServiceState {
    pub fn new(admin_key: AdminKey) -> Self {
        Self {
            repositories: TypeMap::new(),
            admin_key,
        }
    }

    pub fn insert_manual<T: Send + Sync + 'static>(&mut self, repository: T) {
        self.repositories.insert(repository);
    }
}

#[derive(Debug, Clone)]
pub struct HandlerContext {
    pub source_address: String,
}

#[derive(Clone)]
pub struct GeneralContext(pub Arc<ServiceState>, pub HandlerContext);

impl GeneralContext {
    pub fn new(state: Arc<ServiceState>, handler: HandlerContext) -> Self {
        Self(state, handler)
    }

    pub fn admin_key(&self) -> &AdminKey {
        &self.0.admin_key
    }

    pub fn source_address(&self) -> &str {
        &self.1.source_address
    }

    pub fn get_manual<T: 'static + Clone + Send + Sync>(&self) -> Option<T> {
        self.0.repositories.get::<T>().cloned()
    }

    pub fn try_get_manual<T: 'static + Clone + Send + Sync>(&self) -> error::Result<T> {
        self.0.repositories.get::<T>().cloned().ok_or(
            anyhow::anyhow!("{} not found in service state", std::any::type_name::<T>())
                .code(500),
        )
    }
}
