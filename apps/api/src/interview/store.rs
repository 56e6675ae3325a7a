use std::collections::HashMap;

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use super::session::InterviewSession;

const REDIS_KEY_PREFIX: &str = "interview:session:";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session store backend error: {0}")]
    Backend(String),

    #[error("stored session could not be decoded: {0}")]
    Codec(#[from] serde_json::Error),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Keyed storage for interview sessions. The engine is its only writer.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Result<Option<InterviewSession>, StoreError>;
    async fn put(&self, session: &InterviewSession) -> Result<(), StoreError>;
    async fn delete(&self, session_id: &str) -> Result<bool, StoreError>;
    /// Short name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, InterviewSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<InterviewSession>, StoreError> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn put(&self, session: &InterviewSession) -> Result<(), StoreError> {
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<bool, StoreError> {
        Ok(self.sessions.write().await.remove(session_id).is_some())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Sessions as JSON strings under `interview:session:<id>`, no expiry.
pub struct RedisSessionStore {
    connection: redis::aio::MultiplexedConnection,
}

impl RedisSessionStore {
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let connection = client.get_multiplexed_async_connection().await?;
        info!("Redis session store connected");
        Ok(Self { connection })
    }

    fn key(session_id: &str) -> String {
        format!("{REDIS_KEY_PREFIX}{session_id}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<InterviewSession>, StoreError> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = conn.get(Self::key(session_id)).await?;
        raw.map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn put(&self, session: &InterviewSession) -> Result<(), StoreError> {
        let json = serde_json::to_string(session)?;
        let mut conn = self.connection.clone();
        conn.set::<_, _, ()>(Self::key(&session.session_id), json).await?;
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<bool, StoreError> {
        let mut conn = self.connection.clone();
        let removed: u32 = conn.del(Self::key(session_id)).await?;
        Ok(removed > 0)
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
