//! [`InMemory`] [`Catalog`] implementation.

#[cfg(feature = "files")]
use std::path::{Path, PathBuf};
use std::{collections::HashMap, sync::Arc};

use common::operations::{By, Perform, Select};
use tokio::sync::RwLock;
use tracerr::Traced;
#[cfg(feature = "files")]
use tracing as log;

#[cfg(feature = "files")]
use super::Error;
use super::{Catalog, Reload};
use crate::domain::{listing, Listing};

/// [`Catalog`] keeping an atomically replaceable snapshot of [`Listing`]s in
/// memory, optionally backed by a JSON source file.
#[derive(Clone, Debug)]
pub struct InMemory {
    /// Current snapshot of [`Listing`]s.
    listings: Arc<RwLock<Arc<[Listing]>>>,

    /// JSON file this [`InMemory`] [`Catalog`] is loaded from, if any.
    #[cfg(feature = "files")]
    source: Option<Arc<Path>>,
}

impl InMemory {
    /// Creates a new [`InMemory`] [`Catalog`] of the provided [`Listing`]s.
    #[must_use]
    pub fn new(listings: impl IntoIterator<Item = Listing>) -> Self {
        Self {
            listings: Arc::new(RwLock::new(listings.into_iter().collect())),
            #[cfg(feature = "files")]
            source: None,
        }
    }

    /// Opens a new [`InMemory`] [`Catalog`] loaded from the JSON file at the
    /// provided `path`, which is re-read on every [`Reload`].
    ///
    /// # Errors
    ///
    /// If the file cannot be read or is malformed.
    #[cfg(feature = "files")]
    pub async fn open(
        path: impl Into<PathBuf>,
    ) -> Result<Self, Traced<super::Error>> {
        let path: PathBuf = path.into();
        let path: Arc<Path> = path.into();
        let listings = read(&path).await.map_err(tracerr::wrap!())?;
        log::info!(
            "loaded {} listings from `{}`",
            listings.len(),
            path.display(),
        );
        Ok(Self {
            listings: Arc::new(RwLock::new(listings.into())),
            source: Some(path),
        })
    }

    /// Returns the current snapshot of [`Listing`]s.
    async fn snapshot(&self) -> Arc<[Listing]> {
        Arc::clone(&*self.listings.read().await)
    }
}

/// Reads [`Listing`]s out of the JSON file at the provided `path`.
///
/// Malformed records are skipped, while the file itself must be a JSON array.
#[cfg(feature = "files")]
async fn read(path: &Path) -> Result<Vec<Listing>, Traced<Error>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(tracerr::from_and_wrap!(=> Error))?;
    let records: Vec<serde_json::Value> = serde_json::from_slice(&bytes)
        .map_err(tracerr::from_and_wrap!(=> Error))?;
    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(n, record)| {
            serde_json::from_value(record)
                .map_err(|e| {
                    log::warn!(
                        "skipping malformed listing #{n} of `{}`: {e}",
                        path.display(),
                    );
                })
                .ok()
        })
        .collect())
}

impl Catalog<Select<By<Arc<[Listing]>, ()>>> for InMemory {
    type Ok = Arc<[Listing]>;
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        _: Select<By<Arc<[Listing]>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.snapshot().await)
    }
}

impl Catalog<Select<By<Option<Listing>, listing::Id>>> for InMemory {
    type Ok = Option<Listing>;
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.snapshot().await.iter().find(|l| l.id == id).cloned())
    }
}

impl<IDs> Catalog<Select<By<Vec<Listing>, IDs>>> for InMemory
where
    IDs: AsRef<[listing::Id]>,
{
    type Ok = Vec<Listing>;
    type Err = Traced<super::Error>;

    /// Selects [`Listing`]s in the order of the provided IDs, skipping the
    /// missing ones.
    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let snapshot = self.snapshot().await;
        let by_id = snapshot
            .iter()
            .map(|l| (l.id, l))
            .collect::<HashMap<_, _>>();
        Ok(by.into_inner()
            .as_ref()
            .iter()
            .filter_map(|id| by_id.get(id).copied().cloned())
            .collect())
    }
}

impl Catalog<Perform<Reload>> for InMemory {
    /// Number of [`Listing`]s after reloading.
    type Ok = usize;
    type Err = Traced<super::Error>;

    async fn execute(
        &self,
        _: Perform<Reload>,
    ) -> Result<Self::Ok, Self::Err> {
        #[cfg(feature = "files")]
        if let Some(path) = &self.source {
            let listings: Arc<[Listing]> =
                read(path).await.map_err(tracerr::wrap!())?.into();
            let count = listings.len();
            *self.listings.write().await = listings;
            log::debug!("reloaded {count} listings from `{}`", path.display());
            return Ok(count);
        }

        Ok(self.snapshot().await.len())
    }
}

#[cfg(test)]
mod spec {
    use std::sync::Arc;

    use common::operations::{By, Perform, Select};

    use crate::{
        domain::{listing, Listing},
        infra::catalog::{Catalog as _, InMemory, Reload},
        read::listing::spec::{listing, ListingOf},
    };

    #[tokio::test]
    async fn selects_by_ids_in_their_order() {
        let [a, b, c] = std::array::from_fn(|_| listing(ListingOf::default()));
        let catalog = InMemory::new([a.clone(), b.clone(), c.clone()]);

        let found = catalog
            .execute(Select(By::<Vec<Listing>, _>::new(vec![
                c.id,
                listing::Id::new(),
                a.id,
            ])))
            .await
            .unwrap();

        assert_eq!(found, [c.clone(), a]);
        assert_eq!(
            catalog
                .execute(Select(By::<Option<Listing>, _>::new(b.id)))
                .await
                .unwrap(),
            Some(b),
        );
    }

    #[tokio::test]
    async fn reload_without_source_keeps_snapshot() {
        let catalog = InMemory::new([listing(ListingOf::default())]);

        let count = catalog.execute(Perform(Reload)).await.unwrap();
        let snapshot: Arc<[Listing]> = catalog
            .execute(Select(By::new(())))
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(snapshot.len(), 1);
    }

    #[cfg(feature = "files")]
    #[tokio::test]
    async fn reloads_from_source_file() {
        let dir = std::env::temp_dir()
            .join(format!("catalog-test-{}", listing::Id::new()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("listings.json");
        let first = listing(ListingOf::default());
        let second = listing(ListingOf {
            title: "Gantry CMM",
            ..ListingOf::default()
        });
        let write = |listings: Vec<Listing>| {
            let path = path.clone();
            async move {
                tokio::fs::write(path, serde_json::to_vec(&listings).unwrap())
                    .await
                    .unwrap();
            }
        };

        write(vec![first.clone()]).await;
        let catalog = InMemory::open(&path).await.unwrap();
        write(vec![first, second.clone()]).await;
        let count = catalog.execute(Perform(Reload)).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            catalog
                .execute(Select(By::<Option<Listing>, _>::new(second.id)))
                .await
                .unwrap(),
            Some(second),
        );

        tokio::fs::write(&path, b"not json").await.unwrap();
        assert!(catalog.execute(Perform(Reload)).await.is_err());
        assert_eq!(
            catalog
                .execute(Select(By::<Arc<[Listing]>, _>::new(())))
                .await
                .unwrap()
                .len(),
            2,
        );

        tokio::fs::remove_dir_all(dir).await.unwrap();
    }

    #[cfg(feature = "files")]
    #[tokio::test]
    async fn skips_malformed_records() {
        let path = std::env::temp_dir()
            .join(format!("catalog-test-{}.json", listing::Id::new()));
        let good = listing(ListingOf::default());
        let mut blank = serde_json::to_value(listing(ListingOf {
            title: "Bridge CMM",
            ..ListingOf::default()
        }))
        .unwrap();
        blank["description"] = " ".into();
        blank["model"] = "".into();
        blank["location"]["city"] = "  Jena ".into();
        let mut untitled = serde_json::to_value(&good).unwrap();
        untitled["id"] = listing::Id::new().to_string().into();
        untitled["title"] = "".into();
        let records = serde_json::Value::Array(vec![
            serde_json::to_value(&good).unwrap(),
            blank,
            untitled,
        ]);
        tokio::fs::write(&path, serde_json::to_vec(&records).unwrap())
            .await
            .unwrap();

        let catalog = InMemory::open(&path).await;
        tokio::fs::remove_file(&path).await.unwrap();
        let snapshot: Arc<[Listing]> = catalog
            .unwrap()
            .execute(Select(By::new(())))
            .await
            .unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0], good);
        assert_eq!(snapshot[1].title.to_string(), "Bridge CMM");
        assert_eq!(snapshot[1].description, None);
        assert_eq!(snapshot[1].model, None);
        assert_eq!(
            snapshot[1].location.city.as_ref().map(ToString::to_string),
            Some("Jena".to_owned()),
        );
    }
}
