use crate::auth::repo_types::{AccountRecord, UserProfile};
use crate::kv::{self, KvStore};

pub fn account_key(email: &str) -> String {
    format!("mindbite_account_{email}")
}

impl AccountRecord {
    /// Find an account by (already normalised) email.
    pub async fn find_by_email(
        store: &dyn KvStore,
        email: &str,
    ) -> anyhow::Result<Option<AccountRecord>> {
        kv::get_json(store, &account_key(email)).await
    }

    /// Create a new account; returns `None` if the email is taken.
    pub async fn create(
        store: &dyn KvStore,
        password_hash: String,
        user: UserProfile,
    ) -> anyhow::Result<Option<AccountRecord>> {
        let key = account_key(&user.email);
        let _guard = store.write_lock().await;
        if store.get(&key).await?.is_some() {
            return Ok(None);
        }
        let account = AccountRecord {
            password_hash,
            user,
        };
        kv::set_json(store, &key, &account).await?;
        Ok(Some(account))
    }

    /// Apply `f` to the stored profile and persist it.
    pub async fn update_profile<F>(
        store: &dyn KvStore,
        email: &str,
        f: F,
    ) -> anyhow::Result<Option<UserProfile>>
    where
        F: FnOnce(&mut UserProfile) + Send,
    {
        let key = account_key(email);
        let _guard = store.write_lock().await;
        let Some(mut account) = kv::get_json::<AccountRecord>(store, &key).await? else {
            return Ok(None);
        };
        f(&mut account.user);
        kv::set_json(store, &key, &account).await?;
        Ok(Some(account.user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use time::macros::datetime;

    fn profile(email: &str) -> UserProfile {
        UserProfile::new("Asha Rao".into(), email.into(), datetime!(2024-01-01 0:00 UTC))
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let store = MemoryStore::new();
        let first = AccountRecord::create(&store, "h1".into(), profile("a@b.co"))
            .await
            .unwrap();
        assert!(first.is_some());
        let second = AccountRecord::create(&store, "h2".into(), profile("a@b.co"))
            .await
            .unwrap();
        assert!(second.is_none());
        let stored = AccountRecord::find_by_email(&store, "a@b.co")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.password_hash, "h1");
    }

    #[tokio::test]
    async fn update_profile_persists_changes() {
        let store = MemoryStore::new();
        AccountRecord::create(&store, "h".into(), profile("a@b.co"))
            .await
            .unwrap();
        let updated = AccountRecord::update_profile(&store, "a@b.co", |u| u.name = "Asha".into())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Asha");
        let stored = AccountRecord::find_by_email(&store, "a@b.co")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.user.name, "Asha");
        assert!(AccountRecord::update_profile(&store, "x@y.co", |_| {})
            .await
            .unwrap()
            .is_none());
    }
}
