pub mod classes;
pub mod profiles;
pub mod roster;

use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::config::UploadConfig;
use crate::storage::{BackendKind, ClassStore, DocumentBackend, ProfileStore};

pub use classes::ClassService;
pub use profiles::ProfileService;
pub use roster::RosterService;

/// 所有业务服务，启动时构建一次后注入到各个路由
#[derive(Clone)]
pub struct Services {
    pub classes: ClassService,
    pub roster: RosterService,
    pub profiles: ProfileService,
    pub backend_kind: BackendKind,
}

impl Services {
    pub fn new(
        backend: Arc<dyn DocumentBackend>,
        cache: Arc<dyn ObjectCache>,
        upload: UploadConfig,
    ) -> Self {
        let backend_kind = backend.kind();
        let profile_store = ProfileStore::new(backend.clone(), cache.clone());
        let classes = ClassService::new(ClassStore::new(backend), profile_store.clone(), cache);

        Self {
            roster: RosterService::new(classes.clone()),
            profiles: ProfileService::new(profile_store, upload),
            classes,
            backend_kind,
        }
    }
}
