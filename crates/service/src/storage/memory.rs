use async_trait::async_trait;
use models::User;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{find_by_id, remove_first, replace_in_place, UserRepository};
use crate::errors::ServiceError;

/// In-memory repository for tests, benchmarks and doc examples.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        Self { users: Mutex::new(users) }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<(), ServiceError> {
        self.users.lock().await.push(user);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, ServiceError> {
        let users = self.users.lock().await;
        find_by_id(&*users, id)
    }

    async fn get_all(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.users.lock().await.clone())
    }

    async fn update(&self, user: User) -> Result<(), ServiceError> {
        let mut users = self.users.lock().await;
        replace_in_place(&mut *users, user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let mut users = self.users.lock().await;
        remove_first(&mut *users, id)
    }
}
