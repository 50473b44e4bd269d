//! Post-mutation refresh of the recipe list partitions.
//!
//! # Contract
//! - Runs after a mutation succeeds, never after one fails.
//! - Refetches `recipes(vegetarian: true)` then `recipes(vegetarian: false)`
//!   from the network, both of them, on every mutation.
//! - The mutation call returns only once both refetches have settled.
//! - A refetch failure is reported next to the mutation payload; neither the
//!   starred store nor the server-side write is rolled back.

use super::{ClientError, ClientResult, RecipeClient};
use crate::model::recipe::RecipeView;
use crate::storage::KeyValueStorage;
use crate::transport::GraphqlTransport;
use log::{info, warn};
use std::time::Instant;

/// List partitions refetched after every mutation, in request order.
pub const REFETCH_PARTITIONS: [bool; 2] = [true, false];

/// Freshly resolved views of both partitions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RefetchedLists {
    pub vegetarian: Vec<RecipeView>,
    pub non_vegetarian: Vec<RecipeView>,
}

impl RefetchedLists {
    pub fn partition(&self, vegetarian: bool) -> &[RecipeView] {
        if vegetarian {
            &self.vegetarian
        } else {
            &self.non_vegetarian
        }
    }
}

/// Result of a successful mutation plus the refresh that followed it.
#[derive(Debug)]
pub struct MutationOutcome<D> {
    pub data: D,
    pub refetch: ClientResult<RefetchedLists>,
}

impl<D> MutationOutcome<D> {
    /// Collapses the outcome, treating a refetch failure as an error.
    pub fn into_result(self) -> ClientResult<(D, RefetchedLists)> {
        let lists = self.refetch?;
        Ok((self.data, lists))
    }
}

impl<T: GraphqlTransport, S: KeyValueStorage> RecipeClient<T, S> {
    pub(super) fn settle<D>(&mut self, operation: &str, data: D) -> MutationOutcome<D> {
        let started_at = Instant::now();
        let refetch = self.refetch_partitions();
        match &refetch {
            Ok(_) => info!(
                "event=refetch module=client status=ok trigger={operation} partitions={} duration_ms={}",
                REFETCH_PARTITIONS.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=refetch module=client status=error trigger={operation} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        MutationOutcome { data, refetch }
    }

    // Every partition is attempted even after a failure so the others stay
    // fresh; the first failure is the one reported.
    fn refetch_partitions(&mut self) -> ClientResult<RefetchedLists> {
        let mut lists = RefetchedLists::default();
        let mut first_failure = None;

        for vegetarian in REFETCH_PARTITIONS {
            match self.fetch_list(vegetarian) {
                Ok(records) => {
                    let views = self.resolve(&records);
                    if vegetarian {
                        lists.vegetarian = views;
                    } else {
                        lists.non_vegetarian = views;
                    }
                }
                Err(source) if first_failure.is_none() => {
                    first_failure = Some(ClientError::Refetch { vegetarian, source });
                }
                Err(_) => {}
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(lists),
        }
    }
}
