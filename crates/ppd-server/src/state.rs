use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use ppd_instruments::session::ScreeningSession;
use ppd_predictor::Predictor;

use crate::config::ServerConfig;
use crate::error::ApiError;

pub type Sessions = HashMap<Uuid, ScreeningSession>;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<dyn Predictor>,
    pub sessions: Arc<Mutex<Sessions>>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(predictor: Arc<dyn Predictor>, config: ServerConfig) -> Self {
        Self {
            predictor,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            config: Arc::new(config),
        }
    }

    /// Drop sessions idle for longer than the configured TTL. Returns how many went.
    pub async fn evict_idle(&self, now: jiff::Timestamp) -> usize {
        let ttl = self.config.session_ttl();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(now, ttl));
        before - sessions.len()
    }
}

pub fn session_mut(sessions: &mut Sessions, id: Uuid) -> Result<&mut ScreeningSession, ApiError> {
    sessions.get_mut(&id).ok_or_else(|| ApiError::session_not_found(id))
}
