//! Service contains the listing search and comparison logic of the
//! marketplace.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod task;

use std::{error::Error, sync::Arc};

use common::operations::{By, Delete, Insert, Select, Start};
use indexmap::IndexMap;
use smart_default::SmartDefault;
use tokio::sync::Mutex;
use tracerr::Traced;
use tracing as log;

use self::{
    domain::{
        comparison::{self, Selection},
        country,
    },
    infra::{storage, Storage},
};
#[cfg(doc)]
use self::infra::Catalog;

pub use self::{command::Command, query::Query, task::Task};

/// Default number of non-empty comparison [`Selection`]s kept in memory.
pub const DEFAULT_CACHED_COMPARISONS: usize = 10_000;

/// [`Service`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Capacity of every comparison [`Selection`].
    #[default(comparison::DEFAULT_MAX_ITEMS)]
    pub comparison_max_items: usize,

    /// Maximum number of non-empty comparison [`Selection`]s kept in memory.
    ///
    /// The least recently changed ones are evicted first, and are hydrated
    /// from the [`Storage`] again on the next access.
    #[default(DEFAULT_CACHED_COMPARISONS)]
    pub cached_comparisons: usize,

    /// [`country::Names`] normalizing countries while filtering.
    pub countries: country::Names,

    /// [`query::listings::Search`] configuration.
    pub search: query::listings::Config,

    /// [`task::ReloadCatalog`] configuration, if the catalog should be
    /// reloaded periodically.
    pub reload_catalog: Option<task::reload_catalog::Config>,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Cat, St> {
    /// Configuration of this [`Service`].
    config: Arc<Config>,

    /// [`Catalog`] of this [`Service`].
    catalog: Cat,

    /// [`Storage`] of this [`Service`].
    storage: St,

    /// Non-empty comparison [`Selection`]s hydrated from the [`Storage`], in
    /// the order of their last change.
    ///
    /// A cached [`Selection`] always equals its persisted one.
    comparisons: Arc<Mutex<IndexMap<comparison::Key, Selection>>>,
}

impl<Cat, St> Service<Cat, St> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(
        config: Config,
        catalog: Cat,
        storage: St,
    ) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::ReloadCatalog<Self>,
                        task::reload_catalog::Config,
                    >,
                >,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let this = Service {
            config: Arc::new(config),
            catalog,
            storage,
            comparisons: Arc::default(),
        };

        let mut bg = task::Background::default();
        if let Some(conf) = this.config().reload_catalog {
            let svc = this.clone();
            bg.spawn("reload_catalog", async move {
                svc.execute(Start(By::new(conf))).await
            });
        }

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Catalog`] of this [`Service`].
    #[must_use]
    pub fn catalog(&self) -> &Cat {
        &self.catalog
    }

    /// Returns [`Storage`] of this [`Service`].
    #[must_use]
    pub fn storage(&self) -> &St {
        &self.storage
    }

    /// Returns the comparison [`Selection`] stored under the provided
    /// [`comparison::Key`].
    ///
    /// Doesn't cache the [`Selection`] if it isn't cached already.
    ///
    /// # Errors
    ///
    /// If the [`Storage`] fails.
    pub(crate) async fn current_comparison(
        &self,
        key: &comparison::Key,
    ) -> Result<Selection, Traced<storage::Error>>
    where
        St: Storage<
            Select<By<Option<Selection>, comparison::Key>>,
            Ok = Option<Selection>,
            Err = Traced<storage::Error>,
        >,
    {
        let cache = self.comparisons.lock().await;
        if let Some(selection) = cache.get(key) {
            return Ok(selection.clone());
        }
        self.hydrate_comparison(key).await.map_err(tracerr::wrap!())
    }

    /// Applies the provided `change` to the comparison [`Selection`] stored
    /// under the provided [`comparison::Key`], hydrating it from the
    /// [`Storage`] if it isn't cached.
    ///
    /// The `change` returns whether the [`Selection`] has changed, and only
    /// changed [`Selection`]s are written through to the [`Storage`]. An
    /// emptied [`Selection`] is deleted from the [`Storage`] and forgotten.
    ///
    /// # Errors
    ///
    /// If the [`Storage`] fails. The change is discarded then.
    pub(crate) async fn change_comparison(
        &self,
        key: comparison::Key,
        change: impl FnOnce(&mut Selection) -> bool,
    ) -> Result<Selection, Traced<storage::Error>>
    where
        St: Storage<
                Select<By<Option<Selection>, comparison::Key>>,
                Ok = Option<Selection>,
                Err = Traced<storage::Error>,
            > + Storage<
                Insert<(comparison::Key, Selection)>,
                Ok = (),
                Err = Traced<storage::Error>,
            > + Storage<
                Delete<By<Selection, comparison::Key>>,
                Ok = (),
                Err = Traced<storage::Error>,
            >,
    {
        let capacity = self.config().cached_comparisons;

        let mut cache = self.comparisons.lock().await;
        let mut selection = match cache.shift_remove(&key) {
            Some(s) => s,
            None => self
                .hydrate_comparison(&key)
                .await
                .map_err(tracerr::wrap!())?,
        };

        if change(&mut selection) {
            if selection.is_empty() {
                self.storage
                    .execute(Delete(By::new(key.clone())))
                    .await
                    .map_err(tracerr::wrap!())?;
            } else {
                self.storage
                    .execute(Insert((key.clone(), selection.clone())))
                    .await
                    .map_err(tracerr::wrap!())?;
            }
        }

        if !selection.is_empty() && capacity > 0 {
            if cache.len() >= capacity {
                if let Some((evicted, _)) = cache.shift_remove_index(0) {
                    log::debug!(
                        "evicted comparison of `{}` from memory",
                        evicted.client(),
                    );
                }
            }
            _ = cache.insert(key, selection.clone());
        }

        Ok(selection)
    }

    /// Reads the comparison [`Selection`] stored under the provided
    /// [`comparison::Key`] from the [`Storage`], bounded to the configured
    /// capacity.
    ///
    /// A malformed persisted [`Selection`] is discarded as an empty one.
    async fn hydrate_comparison(
        &self,
        key: &comparison::Key,
    ) -> Result<Selection, Traced<storage::Error>>
    where
        St: Storage<
            Select<By<Option<Selection>, comparison::Key>>,
            Ok = Option<Selection>,
            Err = Traced<storage::Error>,
        >,
    {
        let max_items = self.config().comparison_max_items;

        let persisted =
            match self.storage.execute(Select(By::new(key.clone()))).await {
                Ok(s) => s,
                Err(err) if err.as_ref().is_malformed() => {
                    log::warn!(
                        "discarding malformed comparison of `{}`: {err}",
                        key.client(),
                    );
                    None
                }
                Err(err) => return Err(tracerr::wrap!()(err)),
            };

        Ok(persisted.map_or_else(
            || Selection::new(max_items),
            |s| s.with_max_items(max_items),
        ))
    }
}
