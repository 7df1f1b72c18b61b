use leptos::*;
use std::future::Future;
use valentis_core::fetch::FetchGeneration;
use valentis_core::ApiError;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

pub type ReadLoad<T> = ReadSignal<LoadState<T>>;

/// Fetch-on-mount for a page view.
///
/// Runs `fetch` now and again whenever `key` changes. Responses belonging to a
/// superseded key, or arriving after the view is gone, are dropped. Failures
/// become the backend's detail, or `fallback` when it gave none.
pub fn load_on<K, T, Fut>(
    key: impl Fn() -> K + 'static,
    fetch: impl Fn(K) -> Fut + 'static,
    fallback: &'static str,
) -> ReadLoad<T>
where
    K: 'static,
    T: 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let (state, set_state) = create_signal(LoadState::Loading);
    let generation = FetchGeneration::new();

    let on_unmount = generation.clone();
    on_cleanup(move || on_unmount.invalidate());

    create_effect(move |_| {
        let request = fetch(key());
        let ticket = generation.begin();
        let generation = generation.clone();
        set_state.set(LoadState::Loading);

        spawn_local(async move {
            let outcome = match request.await {
                Ok(value) => LoadState::Ready(value),
                Err(err) => {
                    log::warn!("{fallback}: {err}");
                    LoadState::Failed(err.user_message(fallback))
                }
            };
            if !generation.settle(ticket, outcome, |outcome| set_state.set(outcome)) {
                log::debug!("dropped stale response ({fallback})");
            }
        });
    });

    state
}

/// [`load_on`] for views without a route parameter.
pub fn load_once<T, Fut>(
    fetch: impl Fn() -> Fut + 'static,
    fallback: &'static str,
) -> ReadLoad<T>
where
    T: 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    load_on(|| (), move |()| fetch(), fallback)
}
