//! [`ReloadCatalog`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::operations::{By, Perform, Start};
use tokio::time::{interval, MissedTickBehavior};
use tracerr::Traced;
use tracing as log;

use crate::{
    infra::{catalog, Catalog},
    Service,
};

use super::Task;

/// Configuration for [`ReloadCatalog`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between [`Catalog`] reloads.
    pub interval: time::Duration,
}

/// [`Task`] for periodically reloading the [`Catalog`] snapshot from its
/// source.
///
/// A failed reload keeps the previous snapshot.
#[derive(Clone, Copy, Debug)]
pub struct ReloadCatalog<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Cat, St> Task<Start<By<ReloadCatalog<Self>, Config>>>
    for Service<Cat, St>
where
    ReloadCatalog<Service<Cat, St>>:
        Task<Perform<()>, Ok = (), Err: Error> + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<ReloadCatalog<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = ReloadCatalog {
            config,
            service: self.clone(),
        };

        if task.config.interval.is_zero() {
            log::warn!("`task::ReloadCatalog` is disabled by zero interval");
            return Ok(());
        }

        let mut interval = interval(task.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately, while the catalog is fresh.
        _ = interval.tick().await;
        loop {
            _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::ReloadCatalog` failed: {e}");
            });
        }
    }
}

impl<Cat, St> Task<Perform<()>> for ReloadCatalog<Service<Cat, St>>
where
    Cat: Catalog<
        Perform<catalog::Reload>,
        Ok = usize,
        Err = Traced<catalog::Error>,
    >,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let count = self
            .service
            .catalog()
            .execute(Perform(catalog::Reload))
            .await
            .map_err(tracerr::wrap!())?;
        log::info!("catalog reloaded with {count} listings");
        Ok(())
    }
}

/// Error of [`ReloadCatalog`] execution.
pub type ExecutionError = Traced<catalog::Error>;

#[cfg(all(test, feature = "files"))]
mod spec {
    use std::{sync::Arc, time::Duration};

    use common::operations::{By, Perform, Select, Start};

    use crate::{
        domain::Listing,
        infra::{catalog, storage, Catalog as _},
        read::listing::spec::{listing, ListingOf},
        Config, Service, Task as _,
    };

    use super::{Config as TaskConfig, ReloadCatalog};

    #[tokio::test]
    async fn keeps_snapshot_when_reload_fails() {
        let path = std::env::temp_dir()
            .join(format!("reload-catalog-{}.json", std::process::id()));
        let listings = vec![listing(ListingOf::default())];
        tokio::fs::write(&path, serde_json::to_vec(&listings).unwrap())
            .await
            .unwrap();
        let (svc, _) = Service::new(
            Config::default(),
            catalog::InMemory::open(&path).await.unwrap(),
            storage::InMemory::new(),
        );
        let task = ReloadCatalog {
            config: TaskConfig {
                interval: Duration::from_secs(60),
            },
            service: svc.clone(),
        };

        tokio::fs::write(&path, b"[{").await.unwrap();
        let res = task.execute(Perform(())).await;
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(res.is_err());
        let snapshot: Arc<[Listing]> =
            svc.catalog().execute(Select(By::new(()))).await.unwrap();
        assert_eq!(*snapshot, *listings);
    }

    #[tokio::test]
    async fn does_not_run_with_zero_interval() {
        let (svc, _) = Service::new(
            Config::default(),
            catalog::InMemory::new([]),
            storage::InMemory::new(),
        );

        svc.execute(Start(By::<ReloadCatalog<_>, _>::new(TaskConfig {
            interval: Duration::ZERO,
        })))
        .await
        .unwrap();
    }
}
