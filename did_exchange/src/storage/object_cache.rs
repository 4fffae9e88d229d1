use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::errors::error::{DidExchangeError, DidExchangeErrorKind, DidExchangeResult};

pub struct ObjectCache<T>
where
    T: Clone,
{
    cache_name: String,
    store: RwLock<HashMap<String, Mutex<T>>>,
}

impl<T> ObjectCache<T>
where
    T: Clone,
{
    pub fn new(cache_name: &str) -> ObjectCache<T> {
        ObjectCache {
            store: Default::default(),
            cache_name: cache_name.to_string(),
        }
    }

    fn _lock_store_read(&self) -> DidExchangeResult<RwLockReadGuard<HashMap<String, Mutex<T>>>> {
        match self.store.read() {
            Ok(guard) => Ok(guard),
            Err(err) => {
                error!("Unable to read-lock object store: {:?}", err);
                Err(DidExchangeError::from_msg(
                    DidExchangeErrorKind::LockError,
                    format!(
                        "[ObjectCache: {}] Unable to lock object store: {:?}",
                        self.cache_name, err
                    ),
                ))
            }
        }
    }

    fn _lock_store_write(&self) -> DidExchangeResult<RwLockWriteGuard<HashMap<String, Mutex<T>>>> {
        match self.store.write() {
            Ok(guard) => Ok(guard),
            Err(err) => {
                error!("Unable to write-lock object store: {:?}", err);
                Err(DidExchangeError::from_msg(
                    DidExchangeErrorKind::LockError,
                    format!(
                        "[ObjectCache: {}] Unable to lock object store: {:?}",
                        self.cache_name, err
                    ),
                ))
            }
        }
    }

    pub fn contains_key(&self, id: &str) -> DidExchangeResult<bool> {
        let store = self._lock_store_read()?;
        Ok(store.contains_key(id))
    }

    pub fn get(&self, id: &str) -> DidExchangeResult<T> {
        let store = self._lock_store_read()?;
        match store.get(id) {
            Some(m) => match m.lock() {
                Ok(obj) => Ok((*obj).clone()),
                Err(_) => Err(DidExchangeError::from_msg(
                    DidExchangeErrorKind::LockError,
                    format!("[ObjectCache: {}] Unable to lock object", self.cache_name),
                )),
            },
            None => Err(DidExchangeError::from_msg(
                DidExchangeErrorKind::NotFound,
                format!(
                    "[ObjectCache: {}] Object not found for id: {}",
                    self.cache_name, id
                ),
            )),
        }
    }

    pub fn insert(&self, id: &str, obj: T) -> DidExchangeResult<String> {
        let mut store = self._lock_store_write()?;
        store.insert(id.to_string(), Mutex::new(obj));
        Ok(id.to_string())
    }

    pub fn remove(&self, id: &str) -> DidExchangeResult<Option<T>> {
        let mut store = self._lock_store_write()?;
        let obj = store
            .remove(id)
            .map(|m| m.into_inner().unwrap_or_else(PoisonError::into_inner));
        Ok(obj)
    }

    /// Ids of all objects the closure maps to `Some`. Poisoned entries are
    /// skipped rather than failing the whole scan.
    pub fn find_by<F>(&self, closure: F) -> DidExchangeResult<Vec<String>>
    where
        F: FnMut((&String, &Mutex<T>)) -> Option<String>,
    {
        let store = self._lock_store_read()?;
        Ok(store.iter().filter_map(closure).collect())
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::errors::error::DidExchangeErrorKind;

    #[test]
    fn test_get_missing_object() {
        let cache: ObjectCache<String> = ObjectCache::new("test");
        let err = cache.get("unknown").unwrap_err();
        assert_eq!(err.kind(), DidExchangeErrorKind::NotFound);
    }

    #[test]
    fn test_insert_and_get() {
        let cache: ObjectCache<String> = ObjectCache::new("test");
        cache.insert("id-1", "value".to_string()).unwrap();
        assert_eq!(cache.get("id-1").unwrap(), "value");
        assert!(cache.contains_key("id-1").unwrap());
    }

    #[test]
    fn test_remove() {
        let cache: ObjectCache<String> = ObjectCache::new("test");
        cache.insert("id-1", "value".to_string()).unwrap();
        assert_eq!(cache.remove("id-1").unwrap(), Some("value".to_string()));
        assert!(!cache.contains_key("id-1").unwrap());
        assert_eq!(cache.remove("id-1").unwrap(), None);
    }

    #[test]
    fn test_find_by() {
        let cache: ObjectCache<u32> = ObjectCache::new("test");
        cache.insert("a", 1).unwrap();
        cache.insert("b", 2).unwrap();
        cache.insert("c", 3).unwrap();

        let mut found = cache
            .find_by(|(id, m)| {
                let value = m.lock().ok()?;
                (*value > 1).then(|| id.clone())
            })
            .unwrap();
        found.sort();
        assert_eq!(found, vec!["b".to_string(), "c".to_string()]);
    }
}
