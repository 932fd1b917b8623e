use payloads::Resource;
use payloads::forms::SelectOption;
use payloads::query::list_key;
use payloads::responses::{Job, StatusColumn};
use yew::prelude::*;

use super::{QueryHandle, use_list, use_query};
use crate::components::options_of;
use crate::get_api_client;

/// Every `R` as select options, for lookup fields and filters.
#[hook]
pub fn use_options<R: Resource>() -> Vec<SelectOption> {
    let list = use_list::<R>(list_key(true, R::PATH, &[]));
    options_of(list.data.as_deref())
}

#[hook]
pub fn use_status_columns() -> QueryHandle<Vec<StatusColumn>> {
    use_query(Some("status-columns".into()), |_| async move {
        get_api_client().status_columns().await
    })
}

#[hook]
pub fn use_jobs() -> QueryHandle<Vec<Job>> {
    use_query(Some("jobs".into()), |_| async move {
        get_api_client().jobs().await
    })
}
