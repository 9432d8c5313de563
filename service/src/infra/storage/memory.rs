//! [`InMemory`] [`Storage`] implementation.

use std::{collections::HashMap, sync::Arc};

use common::operations::{By, Delete, Insert, Select};
use tokio::sync::Mutex;
use tracerr::Traced;

use super::{Error, Storage};
use crate::domain::comparison::{Key, Selection};

/// [`Storage`] keeping serialized blobs in memory.
///
/// Clones share the same blobs.
#[derive(Clone, Debug, Default)]
pub struct InMemory {
    /// Serialized [`Selection`]s by their [`Key`]s.
    blobs: Arc<Mutex<HashMap<Key, String>>>,
}

impl InMemory {
    /// Creates a new empty [`InMemory`] [`Storage`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts the provided raw `blob` under the provided [`Key`], bypassing
    /// serialization.
    pub async fn put_raw(&self, key: Key, blob: impl Into<String>) {
        _ = self.blobs.lock().await.insert(key, blob.into());
    }

    /// Returns the raw blob stored under the provided [`Key`], if any.
    pub async fn get_raw(&self, key: &Key) -> Option<String> {
        self.blobs.lock().await.get(key).cloned()
    }
}

impl Storage<Select<By<Option<Selection>, Key>>> for InMemory {
    type Ok = Option<Selection>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Selection>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.get_raw(by.inner())
            .await
            .map(|blob| serde_json::from_str(&blob))
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

impl Storage<Insert<(Key, Selection)>> for InMemory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert((key, selection)): Insert<(Key, Selection)>,
    ) -> Result<Self::Ok, Self::Err> {
        let blob = serde_json::to_string(&selection)
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        self.put_raw(key, blob).await;
        Ok(())
    }
}

impl Storage<Delete<By<Selection, Key>>> for InMemory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Selection, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        _ = self.blobs.lock().await.remove(by.inner());
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Delete, Insert, Select};

    use crate::{
        domain::{
            comparison::{Key, Selection},
            listing,
        },
        infra::storage::{InMemory, Storage as _},
    };

    #[tokio::test]
    async fn stores_json_blobs() {
        let storage = InMemory::new();
        let key = Key::for_client("abc").unwrap();
        let mut selection = Selection::new(3);
        _ = selection.add(listing::Id::new());

        storage
            .execute(Insert((key.clone(), selection.clone())))
            .await
            .unwrap();

        assert!(storage
            .get_raw(&key)
            .await
            .unwrap()
            .contains(r#""maxItems":3"#));
        assert_eq!(
            storage
                .execute(Select(By::<Option<Selection>, _>::new(key.clone())))
                .await
                .unwrap(),
            Some(selection),
        );

        storage
            .execute(Delete(By::<Selection, _>::new(key.clone())))
            .await
            .unwrap();
        assert_eq!(
            storage
                .execute(Select(By::<Option<Selection>, _>::new(key)))
                .await
                .unwrap(),
            None,
        );
    }

    #[tokio::test]
    async fn reports_malformed_blobs() {
        let storage = InMemory::new();
        let key = Key::for_client("abc").unwrap();
        storage.put_raw(key.clone(), "{broken").await;

        let err = storage
            .execute(Select(By::<Option<Selection>, _>::new(key)))
            .await
            .unwrap_err();

        assert!(err.as_ref().is_malformed());
    }
}
