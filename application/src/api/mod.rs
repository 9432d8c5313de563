//! GraphQL API definitions.

pub mod comparison;
pub mod listing;
mod mutation;
pub mod plan;
mod query;
pub mod scalar;

use juniper::EmptySubscription;

use crate::Context;

pub use self::{
    comparison::Comparison, listing::Listing, mutation::Mutation, plan::Plan,
    query::Query,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Creates a new GraphQL [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
