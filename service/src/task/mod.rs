//! Background [`Task`]s definitions.

mod background;
pub mod reload_catalog;

pub use common::Handler as Task;

pub use self::{
    background::{Background, Failure},
    reload_catalog::ReloadCatalog,
};
