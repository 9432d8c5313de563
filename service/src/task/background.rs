//! Background environment for running [`Task`]s.

use std::{
    error::Error as StdError,
    future::{Future, IntoFuture},
};

use derive_more::Display;
use futures::{
    future::{self, LocalBoxFuture},
    FutureExt as _, TryFutureExt as _,
};
use tokio::task;
use tracing as log;

#[cfg(doc)]
use crate::Task;

/// Background environment for running [`Task`]s on a [`task::LocalSet`].
#[derive(Debug, Default)]
pub struct Background {
    /// Local set the [`Task`]s are spawned on.
    set: task::LocalSet,

    /// Names and handles of the spawned [`Task`]s.
    handles: Vec<(&'static str, task::JoinHandle<Result<(), Failure>>)>,
}

impl Background {
    /// Spawns a new [`Task`] with the provided `name` inside this
    /// [`Background`] environment.
    ///
    /// Nothing runs until this [`Background`] is awaited.
    pub fn spawn<F, E>(&mut self, name: &'static str, future: F)
    where
        F: Future<Output = Result<(), E>> + 'static,
        E: StdError + 'static,
    {
        log::debug!("spawning `{name}` background task");
        self.handles.push((
            name,
            self.set.spawn_local(future.map_err(move |e| Failure {
                task: name,
                source: Box::new(e),
            })),
        ));
    }

    /// Returns the number of spawned [`Task`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Indicates whether no [`Task`]s were spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl IntoFuture for Background {
    type Output = Result<(), Failure>;
    type IntoFuture = LocalBoxFuture<'static, Self::Output>;

    /// Runs all the spawned [`Task`]s, resolving with the first [`Failure`].
    fn into_future(self) -> Self::IntoFuture {
        let Self { set, handles } = self;
        let tasks = handles.into_iter().map(|(name, h)| {
            h.map(move |r| {
                r.unwrap_or_else(|e| {
                    Err(Failure {
                        task: name,
                        source: Box::new(e),
                    })
                })
            })
            .boxed_local()
        });
        future::try_join_all(
            tasks.chain([set.map(Ok::<_, Failure>).boxed_local()]),
        )
        .map_ok(drop)
        .boxed_local()
    }
}

/// Failure of a [`Task`] running in a [`Background`].
#[derive(Debug, Display)]
#[display("`{task}` background task failed: {source}")]
pub struct Failure {
    /// Name of the failed [`Task`].
    pub task: &'static str,

    /// Error the [`Task`] failed with.
    pub source: Box<dyn StdError + 'static>,
}

impl StdError for Failure {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.source)
    }
}
