//! Shared application state.
//!
//! Owns the request counter and the user repository. Cloned into every
//! handler; the heavy parts sit behind `Arc`.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::obs::RequestCounter;
use crate::users::{InMemoryUserRepository, UserRepository};

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<ServiceConfig>,
    counter: Arc<RequestCounter>,
    users: Arc<dyn UserRepository>,
}

impl AppState {
    /// State with an in-memory user store.
    pub fn new(cfg: ServiceConfig) -> Self {
        Self::with_repository(cfg, Arc::new(InMemoryUserRepository::new()))
    }

    pub fn with_repository(cfg: ServiceConfig, users: Arc<dyn UserRepository>) -> Self {
        Self {
            cfg: Arc::new(cfg),
            counter: Arc::new(RequestCounter::new()),
            users,
        }
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.cfg
    }

    pub fn service_name(&self) -> &str {
        &self.cfg.service.name
    }

    pub fn counter(&self) -> Arc<RequestCounter> {
        Arc::clone(&self.counter)
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        Arc::clone(&self.users)
    }

    pub fn set_draining(&self) {
        self.counter.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.counter.is_draining()
    }
}
