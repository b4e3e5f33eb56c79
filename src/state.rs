use crate::config::settings::AppConfig;
use crate::infrastructure::queue::rabbitmq::RabbitMqService;
use crate::infrastructure::storage::s3::StorageService;
use crate::modules::jobs::store::JobStore;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub storage: StorageService,
    pub queue: RabbitMqService,
    pub jobs: JobStore,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        storage: StorageService,
        queue: RabbitMqService,
        jobs: JobStore,
    ) -> Self {
        Self {
            config,
            storage,
            queue,
            jobs,
        }
    }
}
