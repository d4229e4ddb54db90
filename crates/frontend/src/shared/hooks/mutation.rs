//! Write operations with loading and error state.

use leptos::prelude::*;
use std::future::Future;
use std::rc::Rc;

use crate::shared::error::AppError;
use crate::shared::state::StateCell;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationState {
    pub is_loading: bool,
    pub error: Option<AppError>,
}

type SuccessHook<T, V> = Rc<dyn Fn(&T, &V)>;
type ErrorHook<V> = Rc<dyn Fn(&AppError, &V)>;

pub struct MutationOptions<T, V> {
    on_success: Option<SuccessHook<T, V>>,
    on_error: Option<ErrorHook<V>>,
}

impl<T, V> Default for MutationOptions<T, V> {
    fn default() -> Self {
        Self {
            on_success: None,
            on_error: None,
        }
    }
}

impl<T, V> Clone for MutationOptions<T, V> {
    fn clone(&self) -> Self {
        Self {
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<T, V> MutationOptions<T, V> {
    pub fn on_success(mut self, f: impl Fn(&T, &V) + 'static) -> Self {
        self.on_success = Some(Rc::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&AppError, &V) + 'static) -> Self {
        self.on_error = Some(Rc::new(f));
        self
    }
}

/// Runs `op` once, recording progress in `cell` and returning the outcome.
///
/// `is_loading` is back to false on both paths before this returns.
pub async fn run_mutation<T, V, C, F, Fut, E>(
    cell: &C,
    op: F,
    variables: V,
    options: &MutationOptions<T, V>,
) -> Result<T, AppError>
where
    C: StateCell<MutationState>,
    V: Clone,
    F: FnOnce(V) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<AppError>,
{
    cell.apply(|state| {
        state.is_loading = true;
        state.error = None;
    });

    match op(variables.clone()).await.map_err(Into::into) {
        Ok(data) => {
            cell.apply(|state| state.is_loading = false);
            if let Some(on_success) = &options.on_success {
                on_success(&data, &variables);
            }
            Ok(data)
        }
        Err(error) => {
            log::error!("mutation failed: {error}");
            cell.apply(|state| {
                state.is_loading = false;
                state.error = Some(error.clone());
            });
            if let Some(on_error) = &options.on_error {
                on_error(&error, &variables);
            }
            Err(error)
        }
    }
}

pub struct Mutation<T, V, F> {
    state: RwSignal<MutationState>,
    op: StoredValue<Rc<F>, LocalStorage>,
    options: StoredValue<MutationOptions<T, V>, LocalStorage>,
}

impl<T, V, F> Clone for Mutation<T, V, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V, F> Copy for Mutation<T, V, F> {}

impl<T, V, F, Fut, E> Mutation<T, V, F>
where
    T: 'static,
    V: Clone + 'static,
    F: Fn(V) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>>,
    E: Into<AppError>,
{
    pub async fn mutate(&self, variables: V) -> Result<T, AppError> {
        let (Some(op), Some(options)) = (self.op.try_get_value(), self.options.try_get_value())
        else {
            return Err(AppError::unknown("mutation used after its scope was disposed"));
        };
        run_mutation(&self.state, move |v| op(v), variables, &options).await
    }

    pub fn is_loading(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_loading))
    }

    pub fn error(&self) -> Signal<Option<AppError>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.error.clone()))
    }

    /// Clears the stored error
    pub fn reset(&self) {
        self.state.update(|s| s.error = None);
    }
}

pub fn use_mutation<T, V, F, Fut, E>(op: F, options: MutationOptions<T, V>) -> Mutation<T, V, F>
where
    T: 'static,
    V: Clone + 'static,
    F: Fn(V) -> Fut + 'static,
    Fut: Future<Output = Result<T, E>>,
    E: Into<AppError>,
{
    Mutation {
        state: RwSignal::new(MutationState::default()),
        op: StoredValue::new_local(Rc::new(op)),
        options: StoredValue::new_local(options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[tokio::test]
    async fn test_success_returns_value_and_calls_on_success() {
        let cell = Rc::new(RefCell::new(MutationState::default()));
        let seen = Rc::new(Cell::new(0));
        let seen_hook = seen.clone();
        let options = MutationOptions::default().on_success(move |out: &u32, v: &u32| {
            seen_hook.set(out + v);
        });

        let result = run_mutation(&cell, |v: u32| async move { Ok::<_, AppError>(v * 2) }, 21, &options).await;

        assert_eq!(result, Ok(42));
        assert_eq!(seen.get(), 63);
        assert_eq!(*cell.borrow(), MutationState::default());
    }

    #[tokio::test]
    async fn test_failure_is_stored_reported_once_and_propagated() {
        let cell = Rc::new(RefCell::new(MutationState::default()));
        let errors = Rc::new(Cell::new(0));
        let errors_hook = errors.clone();
        let loading_during = Rc::new(Cell::new(false));
        let observed = cell.clone();
        let loading_seen = loading_during.clone();
        let options = MutationOptions::<(), &str>::default().on_error(move |e, v| {
            assert_eq!(e, &AppError::Unknown("refusé".into()));
            assert_eq!(*v, "REF-1");
            errors_hook.set(errors_hook.get() + 1);
        });

        let result = run_mutation(
            &cell,
            move |_| async move {
                loading_seen.set(observed.borrow().is_loading);
                Err::<(), _>("refusé")
            },
            "REF-1",
            &options,
        )
        .await;

        assert_eq!(result, Err(AppError::Unknown("refusé".into())));
        assert!(loading_during.get());
        assert_eq!(errors.get(), 1);
        let state = cell.borrow();
        assert!(!state.is_loading);
        assert_eq!(state.error, Some(AppError::Unknown("refusé".into())));
    }

    #[tokio::test]
    async fn test_new_attempt_clears_previous_error() {
        let cell = Rc::new(RefCell::new(MutationState {
            is_loading: false,
            error: Some(AppError::unknown("ancienne")),
        }));
        let options = MutationOptions::<(), ()>::default();
        let result = run_mutation(&cell, |_| async { Ok::<_, AppError>(()) }, (), &options).await;
        assert!(result.is_ok());
        assert_eq!(cell.borrow().error, None);
    }
}
