use serde::{de::DeserializeOwned, Serialize};

/// Synchronous key-value persistence for session state.
///
/// This is the stand-in for the browser's `localStorage`: small, local,
/// string-keyed, and fast enough that callers never need to await it.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait StorageService: Send + Sync + 'static {
    /// Reads a stored value.
    ///
    /// Returns `Ok(None)` if the key is absent; returns an error if the
    /// stored value exists but cannot be decoded.
    fn read<T: DeserializeOwned + 'static>(&self, key: &str) -> anyhow::Result<Option<T>>;

    /// Creates or replaces a stored value.
    fn write<T: Serialize + Sync + 'static>(&self, key: &str, value: &T) -> anyhow::Result<()>;

    /// Removes a stored value.
    ///
    /// Does nothing if the key is absent.
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

#[cfg(feature = "mock")]
impl MockStorageService {
    pub fn with_read<T: DeserializeOwned + Send + 'static>(
        mut self,
        key: &'static str,
        result: Option<T>,
    ) -> Self {
        self.expect_read()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Ok(result));
        self
    }

    pub fn with_read_malformed<T: DeserializeOwned + Send + 'static>(
        mut self,
        key: &'static str,
    ) -> Self {
        self.expect_read::<T>()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(move |_| Err(anyhow::anyhow!("malformed value for key {key:?}")));
        self
    }

    pub fn with_write<T>(mut self, key: &'static str, value: T) -> Self
    where
        T: std::fmt::Debug + PartialEq + Serialize + Send + Sync + 'static,
    {
        self.expect_write()
            .once()
            .with(
                mockall::predicate::eq(key),
                mockall::predicate::eq(value),
            )
            .return_once(|_, _| Ok(()));
        self
    }

    pub fn with_remove(mut self, key: &'static str) -> Self {
        self.expect_remove()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Ok(()));
        self
    }
}
