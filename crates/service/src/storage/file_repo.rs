use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use models::User;
use tokio::{fs, sync::Mutex};
use tracing::debug;
use uuid::Uuid;

use super::{find_by_id, remove_first, replace_in_place, UserRepository};
use crate::errors::ServiceError;

/// JSON file-backed user collection.
///
/// The file holds a pretty-printed JSON array of users. Each operation reads
/// the whole file, decides, and (for mutations) rewrites the whole file while
/// holding the instance lock. Writes go to a sibling temp file that is synced
/// and renamed over the target, so a failed write leaves the previous content.
///
/// One instance should own a given path per process; separate instances on
/// the same file are not coordinated.
pub struct FileUserRepository {
    lock: Arc<Mutex<()>>,
    file_path: PathBuf,
}

impl FileUserRepository {
    /// Initialize the store from a path. Creates the file with an empty array if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if file_path.file_name().is_none() {
            return Err(ServiceError::StorageIo(format!("{} is not a file path", file_path.display())));
        }
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        match fs::metadata(&file_path).await {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                fs::write(&file_path, b"[]").await?;
                debug!(path = %file_path.display(), "created empty user store");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Arc::new(Self { lock: Arc::new(Mutex::new(())), file_path }))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Run `f` against the store file under the instance lock.
    ///
    /// Waiting for the lock is the only cancellable point. Once acquired, the
    /// guard moves into a blocking task that finishes even if the caller's
    /// future is dropped.
    async fn locked<T, F>(&self, f: F) -> Result<T, ServiceError>
    where
        T: Send + 'static,
        F: FnOnce(&Path) -> Result<T, ServiceError> + Send + 'static,
    {
        let guard = Arc::clone(&self.lock).lock_owned().await;
        let path = self.file_path.clone();
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            f(path.as_path())
        })
        .await
        .map_err(|e| ServiceError::StorageIo(format!("store task failed: {e}")))?
    }
}

fn read_users(path: &Path) -> Result<Vec<User>, ServiceError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_slice(&bytes)
        .map_err(|e| ServiceError::CorruptData(format!("{}: {e}", path.display())))
}

fn write_users(path: &Path, users: &[User]) -> Result<(), ServiceError> {
    ensure_writable(path)?;

    let data = serde_json::to_vec_pretty(users).map_err(|e| ServiceError::StorageIo(e.to_string()))?;
    let temp_path = temp_path_for(path);
    let written = write_and_sync(&temp_path, &data).and_then(|()| std::fs::rename(&temp_path, path));
    if let Err(e) = written {
        // best effort; the target still holds the previous content
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }
    debug!(path = %path.display(), count = users.len(), "user store rewritten");
    Ok(())
}

/// Refuse a target the process could not rewrite in place. The rename commit
/// only needs a writable directory, so the file itself is checked first.
fn ensure_writable(path: &Path) -> Result<(), ServiceError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.permissions().readonly() => {
            return Err(ServiceError::StorageIo(format!("{} is read-only", path.display())));
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    }
    match OpenOptions::new().write(true).open(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ServiceError::StorageIo(format!("{} is not writable: {e}", path.display()))),
    }
}

fn write_and_sync(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl UserRepository for FileUserRepository {
    async fn create(&self, user: User) -> Result<(), ServiceError> {
        self.locked(move |path| {
            let mut users = read_users(path)?;
            users.push(user);
            write_users(path, &users)
        })
        .await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, ServiceError> {
        self.locked(move |path| find_by_id(&read_users(path)?, id)).await
    }

    async fn get_all(&self) -> Result<Vec<User>, ServiceError> {
        self.locked(read_users).await
    }

    async fn update(&self, user: User) -> Result<(), ServiceError> {
        self.locked(move |path| {
            let mut users = read_users(path)?;
            replace_in_place(&mut users, user)?;
            write_users(path, &users)
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.locked(move |path| {
            let mut users = read_users(path)?;
            remove_first(&mut users, id)?;
            write_users(path, &users)
        })
        .await
    }
}
