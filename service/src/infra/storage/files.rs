//! [`Files`] [`Storage`] implementation.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use common::operations::{By, Delete, Insert, Select};
use tokio::fs;
use tracerr::Traced;

use super::{Error, Storage};
use crate::domain::comparison::{Key, Selection};

/// [`Storage`] keeping every [`Selection`] in its own JSON file inside a
/// directory.
#[derive(Clone, Debug)]
pub struct Files {
    /// Directory the files are kept in.
    dir: Arc<Path>,
}

impl Files {
    /// Creates a new [`Files`] [`Storage`] in the provided `dir`ectory.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir: PathBuf = dir.into();
        Self { dir: dir.into() }
    }

    /// Returns the path of the file for the provided [`Key`].
    fn path(&self, key: &Key) -> PathBuf {
        self.dir.join(format!("{}.json", key.client()))
    }
}

impl Storage<Select<By<Option<Selection>, Key>>> for Files {
    type Ok = Option<Selection>;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Selection>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        let blob = match fs::read(self.path(by.inner())).await {
            Ok(blob) => blob,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(tracerr::new!(Error::from(e))),
        };
        serde_json::from_slice(&blob)
            .map(Some)
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

impl Storage<Insert<(Key, Selection)>> for Files {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Insert((key, selection)): Insert<(Key, Selection)>,
    ) -> Result<Self::Ok, Self::Err> {
        let blob = serde_json::to_vec(&selection)
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        // Readers never observe a partially written file.
        let path = self.path(&key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, blob)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
    }
}

impl Storage<Delete<By<Selection, Key>>> for Files {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Selection, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        match fs::remove_file(self.path(by.inner())).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(tracerr::new!(Error::from(e))),
        }
    }
}
