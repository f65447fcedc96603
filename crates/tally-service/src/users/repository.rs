use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;

use tally_core::error::{Result, TallyError};
use tally_core::model::{User, UserDraft};

/// User persistence seam. Errors use the shared `TallyError`:
/// `NotFound` for unknown ids, `Conflict` for duplicate username/email.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>>;
    async fn find_active(&self) -> Result<Vec<User>>;
    async fn find_by_id(&self, id: u64) -> Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn search_by_name(&self, name: &str) -> Result<Vec<User>>;
    async fn count_active(&self) -> Result<u64>;

    async fn create(&self, draft: UserDraft) -> Result<User>;
    async fn update(&self, id: u64, draft: UserDraft) -> Result<User>;
    async fn delete(&self, id: u64) -> Result<()>;
    async fn deactivate(&self, id: u64) -> Result<()>;
}

/// Process-local user store:
/// - `id -> User`
/// - writes serialized by `write_lock` so uniqueness check + insert is atomic
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<u64, User>,
    seq: AtomicU64,
    write_lock: Mutex<()>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            seq: AtomicU64::new(1),
            write_lock: Mutex::new(()),
        }
    }

    fn collect_sorted(&self, keep: impl Fn(&User) -> bool) -> Vec<User> {
        let mut out: Vec<User> = self
            .users
            .iter()
            .filter(|r| keep(r.value()))
            .map(|r| r.value().clone())
            .collect();
        out.sort_by_key(|u| u.id);
        out
    }

    fn find_one(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users
            .iter()
            .find(|r| pred(r.value()))
            .map(|r| r.value().clone())
    }

    /// Caller must hold `write_lock`.
    fn check_unique(&self, draft: &UserDraft, except: Option<u64>) -> Result<()> {
        let taken = |pred: &dyn Fn(&User) -> bool| {
            self.users
                .iter()
                .any(|r| Some(r.value().id) != except && pred(r.value()))
        };
        if taken(&|u: &User| u.username == draft.username) {
            return Err(TallyError::Conflict(format!(
                "username already exists: {}",
                draft.username
            )));
        }
        if taken(&|u: &User| u.email == draft.email) {
            return Err(TallyError::Conflict(format!(
                "email already exists: {}",
                draft.email
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.collect_sorted(|_| true))
    }

    async fn find_active(&self) -> Result<Vec<User>> {
        Ok(self.collect_sorted(|u| u.is_active))
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.find_one(|u| u.username == username))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.find_one(|u| u.email == email))
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<User>> {
        Ok(self.collect_sorted(|u| u.name_contains(name)))
    }

    async fn count_active(&self) -> Result<u64> {
        Ok(self.users.iter().filter(|r| r.value().is_active).count() as u64)
    }

    async fn create(&self, draft: UserDraft) -> Result<User> {
        let _guard = self.write_lock.lock().await;
        self.check_unique(&draft, None)?;

        let id = self.seq.fetch_add(1, Ordering::Relaxed);
        let user = User::from_draft(id, draft, SystemTime::now());
        self.users.insert(id, user.clone());
        tracing::info!(id, username = %user.username, "user created");
        Ok(user)
    }

    async fn update(&self, id: u64, draft: UserDraft) -> Result<User> {
        let _guard = self.write_lock.lock().await;
        if !self.users.contains_key(&id) {
            return Err(TallyError::user_not_found(id));
        }
        self.check_unique(&draft, Some(id))?;

        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or_else(|| TallyError::user_not_found(id))?;
        entry.apply(draft, SystemTime::now());
        tracing::info!(id, "user updated");
        Ok(entry.clone())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        match self.users.remove(&id) {
            Some(_) => {
                tracing::info!(id, "user deleted");
                Ok(())
            }
            None => Err(TallyError::user_not_found(id)),
        }
    }

    async fn deactivate(&self, id: u64) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or_else(|| TallyError::user_not_found(id))?;
        entry.is_active = false;
        entry.updated_at = SystemTime::now();
        tracing::info!(id, "user deactivated");
        Ok(())
    }
}
