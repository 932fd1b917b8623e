use std::future::Future;
use std::rc::Rc;

use payloads::query::{QueryKey, detail_key};
use payloads::{ClientError, Resource};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::state::QueryEntry;
use crate::{State, get_api_client};

/// Extra attempts after a failed fetch.
const RETRIES: u32 = 2;
const RETRY_DELAY_MS: u32 = 800;

pub struct QueryHandle<T> {
    /// Last value fetched for the key, kept through refetches and failed
    /// retries.
    pub data: Option<Rc<T>>,
    pub error: Option<String>,
    pub is_loading: bool,
    pub refetch: Callback<()>,
}

impl<T> QueryHandle<T> {
    /// Render `render_fn` once data is available, and a loading or error
    /// line until then. `context` names the data, like "employees".
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool) -> Html,
    {
        match (&self.data, &self.error) {
            (Some(data), _) => render_fn(data, self.is_loading),
            (None, Some(error)) => html! {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border \
                            border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">
                        {format!("Error loading {context}: {error}")}
                    </p>
                </div>
            },
            (None, None) => html! {
                <div class="text-center py-12">
                    <p class="text-neutral-600 dark:text-neutral-400">
                        {format!("Loading {context}...")}
                    </p>
                </div>
            },
        }
    }
}

/// Cached read keyed by `key`.
///
/// With no key nothing is fetched and there is no data, which is how pages
/// hold a read back until the session or a route parameter is ready. The
/// fetch runs on mount and whenever the key changes; components asking for
/// the same key share one request and one cached value. Nothing refetches
/// on window focus.
#[hook]
pub fn use_query<T, F, Fut>(key: QueryKey, fetch: F) -> QueryHandle<T>
where
    T: 'static,
    F: Fn(String) -> Fut + 'static,
    Fut: Future<Output = Result<T, ClientError>> + 'static,
{
    let (state, dispatch) = use_store::<State>();
    let fetch = Rc::new(fetch);
    // last key this hook asked for; cached data for any other key is stale
    let requested = use_mut_ref(|| None::<String>);

    let refetch = {
        let requested = requested.clone();
        use_callback(key.clone(), move |_: (), key: &QueryKey| {
            *requested.borrow_mut() = key.clone();
            let Some(key) = key.clone() else {
                return;
            };
            if dispatch.get().queries.is_in_flight(&key) {
                return;
            }
            dispatch.reduce_mut(|state| {
                state.queries.begin(&key);
            });

            let dispatch = dispatch.clone();
            let fetch = fetch.clone();
            yew::platform::spawn_local(async move {
                let mut attempt = 0;
                loop {
                    match fetch(key.clone()).await {
                        Ok(value) => {
                            dispatch.reduce_mut(|state| {
                                state.queries.resolve(&key, value)
                            });
                            // asked for again while this fetch ran
                            if dispatch.get().queries.is_in_flight(&key) {
                                attempt = 0;
                                continue;
                            }
                            return;
                        }
                        Err(e) if attempt < RETRIES => {
                            attempt += 1;
                            tracing::debug!(%key, attempt, error = %e, "retrying read");
                            gloo_timers::future::TimeoutFuture::new(
                                RETRY_DELAY_MS * attempt,
                            )
                            .await;
                        }
                        Err(e) => {
                            tracing::warn!(%key, error = %e, "read failed");
                            dispatch.reduce_mut(|state| {
                                state.queries.fail(&key, e.to_string())
                            });
                            if dispatch.get().queries.is_in_flight(&key) {
                                attempt = 0;
                                continue;
                            }
                            return;
                        }
                    }
                }
            });
        })
    };

    {
        let refetch = refetch.clone();
        use_effect_with(key.clone(), move |_| refetch.emit(()));
    }

    let entry = key.as_deref().and_then(|key| state.queries.entry(key));
    QueryHandle {
        data: entry.and_then(|e| e.value::<T>()),
        error: entry.and_then(|e| e.error.clone()),
        is_loading: is_loading(&key, requested.borrow().as_deref(), entry),
        refetch,
    }
}

/// A key is loading until this hook has asked for it and the cache holds a
/// settled answer. A key the hook stopped asking for (it went to `None`)
/// counts as not yet asked, so coming back to it waits for a new fetch.
fn is_loading(
    key: &QueryKey,
    requested: Option<&str>,
    entry: Option<&QueryEntry>,
) -> bool {
    key.is_some()
        && (entry.is_none_or(|e| e.in_flight) || requested != key.as_deref())
}

/// The list of `R` found at `key` (see [`payloads::query::list_key`]).
#[hook]
pub fn use_list<R: Resource>(key: QueryKey) -> QueryHandle<Vec<R>> {
    use_query(key, |key| async move { get_api_client().list::<R>(&key).await })
}

/// One `R`, once `id` is known.
#[hook]
pub fn use_detail<R: Resource>(
    authenticated: bool,
    id: Option<R::Id>,
) -> QueryHandle<R> {
    let key = detail_key(authenticated, R::PATH, id);
    use_query(key, move |_| async move {
        match id {
            Some(id) => get_api_client().detail::<R>(id).await,
            None => Err(ClientError::MissingRecord(R::SINGULAR)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::is_loading;
    use crate::components::form_dialog::should_reset;
    use crate::state::QueryCache;

    const KEY: &str = "departments/3";

    #[test]
    fn reopened_edit_waits_for_the_saved_record() {
        let key = Some(KEY.to_string());
        let mut cache = QueryCache::default();

        // first opening
        let mut requested = key.clone();
        cache.begin(KEY);
        cache.resolve(KEY, "Ops");
        assert!(!is_loading(&key, requested.as_deref(), cache.entry(KEY)));

        // saved, dialog closed: the detail key goes away
        requested = None;
        assert!(!is_loading(&None, requested.as_deref(), cache.entry(KEY)));

        // reopened: the cached "Ops" must not count as ready
        assert!(is_loading(&key, requested.as_deref(), cache.entry(KEY)));
        assert!(!should_reset(Some(1), 2, false));

        requested = key.clone();
        cache.begin(KEY);
        assert!(is_loading(&key, requested.as_deref(), cache.entry(KEY)));
        cache.resolve(KEY, "Operations");
        assert!(!is_loading(&key, requested.as_deref(), cache.entry(KEY)));
        assert!(should_reset(Some(1), 2, true));
        assert_eq!(cache.value::<&str>(KEY).as_deref(), Some(&"Operations"));
    }

    #[test]
    fn no_key_is_never_loading() {
        assert!(!is_loading(&None, None, None));
        assert!(is_loading(&Some("tasks".into()), Some("tasks"), None));
    }
}
