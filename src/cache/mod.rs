//! 对象缓存
//!
//! 以字符串形式存取序列化后的对象，后端通过插件注册表按名称选择（`moka` / `redis`）。
//! 认证中间件用它缓存 `account:{id}`，角色变更与删除账号时需要主动失效。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// 缓存读取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端不可用或值损坏，调用方应回源
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// `ttl` 为 0 时使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    tracing::warn!("Dropping undecodable cache entry '{}': {}", key, e);
                    self.remove(key).await;
                    CacheResult::ExistsButNoValue
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    pub async fn insert_json<T: Serialize>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => tracing::warn!("Skipping cache insert for '{}': {}", key, e),
        }
    }
}

/// 账号对象的缓存键
pub fn account_cache_key(account_id: i64) -> String {
    format!("account:{account_id}")
}

/// 为缓存后端生成 `register_plugin()`，由 [`register_builtin_plugins`] 显式调用
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        pub const PLUGIN_NAME: &str = $name;

        pub fn register_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                PLUGIN_NAME,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::ScholarError::cache_connection)?;
                        Ok::<Box<dyn $crate::cache::ObjectCache>, $crate::errors::ScholarError>(
                            Box::new(cache),
                        )
                    })
                }),
            );
        }
    };
}

/// 注册内置缓存后端
pub fn register_builtin_plugins() {
    object_cache::moka::register_plugin();
    object_cache::redis::register_plugin();
    register::debug_object_cache_registry();
}

#[cfg(test)]
mod tests {
    use super::*;
    use moka::future::Cache;

    struct TestCache(Cache<String, String>);

    #[async_trait]
    impl ObjectCache for TestCache {
        async fn get_raw(&self, key: &str) -> CacheResult<String> {
            self.0
                .get(key)
                .await
                .map_or(CacheResult::NotFound, CacheResult::Found)
        }
        async fn insert_raw(&self, key: String, value: String, _ttl: u64) {
            self.0.insert(key, value).await;
        }
        async fn remove(&self, key: &str) {
            self.0.invalidate(key).await;
        }
        async fn invalidate_all(&self) {
            self.0.invalidate_all();
        }
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let cache: Box<dyn ObjectCache> = Box::new(TestCache(Cache::new(16)));
        cache.insert_json("k".to_string(), &vec![1, 2, 3], 0).await;
        assert_eq!(cache.get_json::<Vec<i32>>("k").await, CacheResult::Found(vec![1, 2, 3]));
        assert_eq!(cache.get_json::<Vec<i32>>("missing").await, CacheResult::NotFound);

        cache.insert_raw("bad".to_string(), "{not json".to_string(), 0).await;
        assert_eq!(cache.get_json::<Vec<i32>>("bad").await, CacheResult::ExistsButNoValue);
        assert_eq!(cache.get_raw("bad").await, CacheResult::NotFound);
    }

    #[test]
    fn test_account_cache_key() {
        assert_eq!(account_cache_key(12), "account:12");
    }
}
