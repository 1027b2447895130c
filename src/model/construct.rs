//! Instance construction: drive every field, collect every failure.

use super::{Instance, ModelType};
use crate::core::{Map, Value};
use crate::validation::{FieldError, ValidationError};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, trace};

/// Outcome for one registry entry: the value to commit, if any.
type FieldCheck = Validation<Option<(String, Value)>, NonEmptyVec<FieldError>>;

impl ModelType {
    /// Construct a validated instance from field-name/raw-value pairs.
    ///
    /// Every field is validated even after an earlier one fails; all
    /// failures come back in field-declaration order, followed by one
    /// `__base__` failure naming any undeclared keys. Values are staged and
    /// only committed to an instance when nothing failed.
    pub fn construct<I, K, V>(&self, input: I) -> Result<Instance, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut remaining: Map = input
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut checks: Vec<FieldCheck> = Vec::with_capacity(self.len() + 1);
        for (name, spec) in self.registry() {
            let check = match remaining.shift_remove(name) {
                Some(raw) => match spec.validate(raw) {
                    Ok(value) => Validation::success(Some((name.clone(), value))),
                    Err(err) => err.into_failure(),
                },
                None if spec.is_required() => {
                    Validation::fail(FieldError::missing(name, spec.expected_type()))
                }
                None => Validation::success(None),
            };
            checks.push(check);
        }

        if !remaining.is_empty() {
            checks.push(Validation::fail(FieldError::unexpected(remaining)));
        }

        match Validation::all_vec(checks) {
            Validation::Success(staged) => {
                trace!(model = %self.name(), "constructed instance");
                let store = staged.into_iter().flatten().collect();
                Ok(Instance::from_store(self.clone(), store))
            }
            Validation::Failure(errors) => {
                debug!(
                    model = %self.name(),
                    errors = errors.len(),
                    "model construction failed"
                );
                Err(errors.into())
            }
        }
    }
}
