use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{Result, ScholarError};
use crate::models::accounts::entities::AccountRole;
use crate::models::accounts::requests::CreateAccountRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@localhost";
const FALLBACK_CACHE: &str = "moka";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        ScholarError::cache_plugin_not_found(format!("Cache backend '{name}' is not registered"))
    })?;
    Ok(Arc::from(constructor().await?))
}

/// 按配置创建缓存，失败时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = AppConfig::get().cache.cache_type.as_str();

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Cache backend '{}' initialized", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != FALLBACK_CACHE => {
            warn!("Failed to create '{}' cache: {}; falling back to memory cache", cache_type, e);
            build_cache(FALLBACK_CACHE).await
        }
        Err(e) => Err(e),
    }
}

fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// 存储中没有任何账号时创建默认管理员
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_accounts().await {
        Ok(count) if count > 0 => {
            debug!("Store already has {} account(s), skipping admin seed", count);
            return;
        }
        Ok(_) => info!("No accounts found, creating default admin account..."),
        Err(e) => {
            warn!("Failed to count accounts: {}, skipping admin seed", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let generated = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN_PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", generated);
        warn!("  Save this password or set ADMIN_PASSWORD");
        warn!("==========================================================");
        generated
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin = CreateAccountRequest {
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password_hash,
        display_name: "Administrator".to_string(),
        role: AccountRole::Admin,
    };

    match storage.create_account(admin).await {
        Ok(account) => info!(
            "Default admin account created (ID: {}, email: {})",
            account.id, account.email
        ),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// 启动前准备：TLS provider、存储与迁移、默认管理员、缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    crate::cache::register_builtin_plugins();

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache = create_cache().await?;

    Ok(StartupContext { storage, cache })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_length_and_charset() {
        let password = generate_random_password(16);
        assert_eq!(password.chars().count(), 16);
        assert!(password.chars().all(|c| c.is_ascii_graphic()));
    }
}
