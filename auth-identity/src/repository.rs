use crate::{error::StoreError, models::*};
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use uuid::Uuid;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Client for the external credential store.
///
/// The store owns password hashing and email uniqueness.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn create_identity(
        &self,
        email: &str,
        password: &SecretString,
    ) -> StoreResult<CredentialIdentity>;
    async fn verify_credentials(
        &self,
        email: &str,
        password: &SecretString,
    ) -> StoreResult<CredentialIdentity>;
}

/// Client for the external profile datastore.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn insert_profile(&self, profile: &NewProfile) -> StoreResult<Profile>;
    /// Every row keyed by `identity_id`; callers decide what a count other than one means.
    async fn get_profile_by_id(&self, identity_id: Uuid) -> StoreResult<Vec<Profile>>;
}

/// Undo hook for an identity whose profile could not be written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityCompensation: Send + Sync {
    async fn compensate(&self, identity_id: Uuid, reason: &str) -> StoreResult<()>;
}

struct StoredIdentity {
    identity: CredentialIdentity,
    password_hash: String,
}

// In-memory implementation for development/testing
pub struct InMemoryIdentityStore {
    // keyed by email
    identities: Arc<DashMap<String, StoredIdentity>>,
    argon2: Argon2<'static>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self {
            identities: Arc::new(DashMap::new()),
            argon2: Argon2::default(),
        }
    }

    pub fn contains_identity(&self, identity_id: Uuid) -> bool {
        self.identities
            .iter()
            .any(|entry| entry.value().identity.id == identity_id)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    fn hash_password(&self, password: &SecretString) -> StoreResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| StoreError::new(format!("Password hashing failed: {e}")))
    }

    fn password_matches(&self, password: &SecretString, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                self.argon2
                    .verify_password(password.expose_secret().as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl Default for InMemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn create_identity(
        &self,
        email: &str,
        password: &SecretString,
    ) -> StoreResult<CredentialIdentity> {
        let password_hash = self.hash_password(password)?;

        match self.identities.entry(email.to_string()) {
            Entry::Occupied(_) => Err(StoreError::new("User already registered")),
            Entry::Vacant(slot) => {
                let identity = CredentialIdentity {
                    id: Uuid::new_v4(),
                    email: email.to_string(),
                    created_at: Utc::now(),
                };
                slot.insert(StoredIdentity {
                    identity: identity.clone(),
                    password_hash,
                });
                Ok(identity)
            }
        }
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &SecretString,
    ) -> StoreResult<CredentialIdentity> {
        // Unknown email and wrong password are indistinguishable
        let (identity, password_hash) = self
            .identities
            .get(email)
            .map(|stored| (stored.identity.clone(), stored.password_hash.clone()))
            .ok_or_else(|| StoreError::new("Invalid login credentials"))?;

        if self.password_matches(password, &password_hash) {
            Ok(identity)
        } else {
            Err(StoreError::new("Invalid login credentials"))
        }
    }
}

#[async_trait]
impl IdentityCompensation for InMemoryIdentityStore {
    async fn compensate(&self, identity_id: Uuid, _reason: &str) -> StoreResult<()> {
        let before = self.identities.len();
        self.identities
            .retain(|_, stored| stored.identity.id != identity_id);

        if self.identities.len() == before {
            return Err(StoreError::new(format!("User not found: {identity_id}")));
        }
        Ok(())
    }
}

pub struct InMemoryProfileStore {
    profiles: Arc<DashMap<Uuid, Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(DashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Seeds the avatar of an existing profile; avatars are managed outside registration.
    pub fn set_avatar_url(
        &self,
        identity_id: Uuid,
        avatar_url: impl Into<String>,
    ) -> StoreResult<()> {
        let mut profile = self
            .profiles
            .get_mut(&identity_id)
            .ok_or_else(|| StoreError::new(format!("Profile not found: {identity_id}")))?;
        profile.avatar_url = Some(avatar_url.into());
        Ok(())
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn insert_profile(&self, profile: &NewProfile) -> StoreResult<Profile> {
        match self.profiles.entry(profile.identity_id) {
            Entry::Occupied(_) => Err(StoreError::new(
                "duplicate key value violates unique constraint \"profiles_pkey\"",
            )),
            Entry::Vacant(slot) => {
                let row = Profile {
                    identity_id: profile.identity_id,
                    full_name: profile.full_name.clone(),
                    role: profile.role,
                    phone: profile.phone.clone(),
                    email: profile.email.clone(),
                    avatar_url: None,
                    created_at: Utc::now(),
                };
                slot.insert(row.clone());
                Ok(row)
            }
        }
    }

    async fn get_profile_by_id(&self, identity_id: Uuid) -> StoreResult<Vec<Profile>> {
        Ok(self
            .profiles
            .get(&identity_id)
            .map(|row| vec![row.value().clone()])
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::new(value.to_string())
    }

    #[tokio::test]
    async fn test_identity_store_rejects_duplicate_email() {
        let store = InMemoryIdentityStore::new();

        store.create_identity("a@b.com", &secret("pw")).await.unwrap();
        let err = store.create_identity("a@b.com", &secret("other")).await.unwrap_err();

        assert_eq!(err.message, "User already registered");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_identity_store_verifies_hashed_password() {
        let store = InMemoryIdentityStore::new();
        let created = store.create_identity("a@b.com", &secret("pw")).await.unwrap();

        let verified = store.verify_credentials("a@b.com", &secret("pw")).await.unwrap();
        assert_eq!(verified, created);

        let wrong = store.verify_credentials("a@b.com", &secret("nope")).await.unwrap_err();
        let unknown = store.verify_credentials("x@y.com", &secret("pw")).await.unwrap_err();
        assert_eq!(wrong, unknown);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_verification_does_not_block_writers() {
        let store = Arc::new(InMemoryIdentityStore::new());
        store.create_identity("a@b.com", &secret("pw")).await.unwrap();

        let mut tasks = Vec::new();
        for i in 0..4 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.verify_credentials("a@b.com", &secret("pw")).await?;
                store
                    .create_identity(&format!("user{i}@b.com"), &secret("pw"))
                    .await
            }));
        }

        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert_eq!(store.len(), 5);
    }

    #[tokio::test]
    async fn test_compensation_removes_identity() {
        let store = InMemoryIdentityStore::new();
        let created = store.create_identity("a@b.com", &secret("pw")).await.unwrap();

        store.compensate(created.id, "profile write failed").await.unwrap();

        assert!(!store.contains_identity(created.id));
        assert!(store.compensate(created.id, "again").await.is_err());
    }

    #[tokio::test]
    async fn test_profile_store_primary_key() {
        let store = InMemoryProfileStore::new();
        let profile = NewProfile {
            identity_id: Uuid::new_v4(),
            full_name: "Name".to_string(),
            role: Role::User,
            phone: "555".to_string(),
            email: "a@b.com".to_string(),
        };

        store.insert_profile(&profile).await.unwrap();
        assert!(store.insert_profile(&profile).await.is_err());

        let rows = store.get_profile_by_id(profile.identity_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(store.get_profile_by_id(Uuid::new_v4()).await.unwrap().is_empty());
    }
}
