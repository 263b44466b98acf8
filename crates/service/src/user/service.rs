use std::sync::Arc;

use async_trait::async_trait;
use models::{NewUser, UpdateUser, User};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::UserRepository;

/// The four-operation user contract consumed by the transport layer.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn create(&self, input: NewUser) -> Result<User, ServiceError>;
    async fn get_by_id(&self, id: Uuid) -> Result<User, ServiceError>;
    async fn get_all(&self) -> Result<Vec<User>, ServiceError>;
    async fn update(&self, update: UpdateUser) -> Result<User, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}

/// User business service independent of transport and storage backend
pub struct UserManager<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserManager<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

#[async_trait]
impl<R: UserRepository> UserService for UserManager<R> {
    /// Validate and persist a new user under a freshly generated id.
    ///
    /// # Examples
    /// ```
    /// use service::{InMemoryUserRepository, UserManager, UserService};
    /// use models::NewUser;
    /// use std::sync::Arc;
    /// let svc = UserManager::new(Arc::new(InMemoryUserRepository::default()));
    /// let user = tokio_test::block_on(svc.create(NewUser::new("Ann", "ann@x.com"))).unwrap();
    /// assert_eq!(user.name, "Ann");
    /// assert!(!user.id.is_nil());
    /// ```
    #[instrument(skip(self, input))]
    async fn create(&self, input: NewUser) -> Result<User, ServiceError> {
        input.validate()?;
        let user = input.into_user(Uuid::new_v4());
        self.repo.create(user.clone()).await?;
        info!(user_id = %user.id, "user_created");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> Result<User, ServiceError> {
        self.repo.get_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<User>, ServiceError> {
        self.repo.get_all().await
    }

    /// Merge the present fields of `update` into the stored record.
    ///
    /// # Examples
    /// ```
    /// use service::{InMemoryUserRepository, UserManager, UserService};
    /// use models::{NewUser, UpdateUser};
    /// use std::sync::Arc;
    /// let svc = UserManager::new(Arc::new(InMemoryUserRepository::default()));
    /// let ann = tokio_test::block_on(svc.create(NewUser::new("Ann", "ann@x.com"))).unwrap();
    /// let merged = tokio_test::block_on(svc.update(UpdateUser::new(ann.id).email("ann2@x.com"))).unwrap();
    /// assert_eq!(merged.name, "Ann");
    /// assert_eq!(merged.email, "ann2@x.com");
    /// ```
    #[instrument(skip(self, update), fields(user_id = %update.id))]
    async fn update(&self, update: UpdateUser) -> Result<User, ServiceError> {
        let mut user = self.repo.get_by_id(update.id).await?;
        update.apply_to(&mut user)?;
        self.repo.update(user.clone()).await?;
        debug!(name_changed = update.name.is_some(), email_changed = update.email.is_some(), "user_updated");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!("user_deleted");
        Ok(())
    }
}
