use std::rc::Rc;

use payloads::forms::{FormModel, FormValues};
use payloads::query::{QueryKey, detail_key, list_key};
use payloads::realtime::Room;
use payloads::responses::MutationResponse;
use payloads::{Resource, filters};
use yew::prelude::*;
use yewdux::prelude::*;

use super::csv::{ExportButton, ImportDialog};
use super::list_state::{ListAction, ListDialog, ListState};
use super::{Column, ConfirmDialog, DataTable, FilterDrawer, FormDialog, Lookups};
use crate::{State, get_api_client};
use crate::hooks::{use_detail, use_list, use_mutation, use_realtime_refresh};
use crate::session::AuthSession;

#[derive(Properties, PartialEq)]
pub struct ResourceListPageProps<R: Resource> {
    pub session: AuthSession,
    pub columns: Rc<Vec<Column<R>>>,
    #[prop_or_default]
    pub lookups: Lookups,
    /// Read a different list than `R::PATH`, e.g. one project's tasks.
    #[prop_or_default]
    pub query_key: Option<QueryKey>,
    #[prop_or_default]
    pub title: Option<AttrValue>,
    /// Room whose change events refresh the list.
    #[prop_or_default]
    pub room: Option<Room>,
    /// Merged over the create form's defaults.
    #[prop_or_default]
    pub create_values: FormValues,
    /// Extra buttons per row, before edit and delete.
    #[prop_or_default]
    pub row_extra: Option<Callback<R, Html>>,
}

/// The standard page for one resource: a filterable, selectable table with
/// create, update, delete, bulk delete, CSV export and CSV import.
///
/// Each successful write shows the server's message, refetches the list
/// once and tells the page's room about it.
#[function_component]
pub fn ResourceListPage<R: Resource>(props: &ResourceListPageProps<R>) -> Html {
    let session = &props.session;
    let key = props
        .query_key
        .clone()
        .unwrap_or_else(|| list_key(true, R::PATH, &[]));
    let list = use_list::<R>(key);
    let state = use_reducer(ListState::<R>::default);
    let dispatch = use_dispatch::<State>();

    use_realtime_refresh(session.clone(), props.room, list.refetch.clone());

    let editing = match state.dialog {
        ListDialog::Update(id) => Some(id),
        _ => None,
    };
    let detail = use_detail::<R>(true, editing);

    let succeeded = {
        let toast = session.toast.clone();
        let session = session.clone();
        let refetch = list.refetch.clone();
        let room = props.room;
        let state = state.clone();
        let dispatch = dispatch.clone();
        let notify = Callback::from(move |message: String| toast.success(message));
        Callback::from(move |response: Rc<MutationResponse<R>>| {
            // the next edit of this record must read what was just saved
            if let Some(key) = detail_key(true, R::PATH, editing) {
                dispatch.reduce_mut(|store| store.queries.evict(&key));
            }
            settle_write(&response.message, R::NOUN, &notify, &refetch);
            if let Some(room) = room {
                session.announce(room);
            }
            state.dispatch(ListAction::MutationSucceeded);
        })
    };

    let on_failure = session.toast.error_callback();
    let create = use_mutation(
        |form: R::Create| async move { get_api_client().create::<R>(&form).await },
        on_failure.clone(),
    );
    let update = use_mutation(
        |(id, form): (R::Id, R::Update)| async move {
            get_api_client().update::<R>(id, &form).await
        },
        on_failure.clone(),
    );
    let delete = use_mutation(
        |id: R::Id| async move { get_api_client().delete_one::<R>(id).await },
        on_failure.clone(),
    );
    let delete_many = use_mutation(
        |ids: Vec<R::Id>| async move {
            get_api_client().delete_many::<R>(&ids).await
        },
        on_failure.clone(),
    );
    let import = use_mutation(
        |rows: Vec<payloads::csv_io::ImportRow>| async move {
            get_api_client().import_csv::<R>(&rows).await
        },
        on_failure,
    );

    let running = create.status.is_running()
        || update.status.is_running()
        || delete.status.is_running()
        || delete_many.status.is_running()
        || import.status.is_running();
    {
        let loading = session.loading.clone();
        use_effect_with(running, move |running| {
            let running = *running;
            if running {
                loading.emit(true);
            }
            move || {
                if running {
                    loading.emit(false)
                }
            }
        });
    }

    let dispatch = |action: fn() -> ListAction<R>| {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(action()))
    };
    let close = {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(ListAction::Close))
    };

    let can_edit = session.can_edit();
    let title = props
        .title
        .clone()
        .unwrap_or_else(|| AttrValue::from(R::TITLE));

    let body = list.render(&R::TITLE.to_lowercase(), |records, refreshing| {
        let visible: Vec<R> = filters::apply(state.filter.as_ref(), records)
            .into_iter()
            .cloned()
            .collect();
        let visible_ids: Vec<R::Id> = visible.iter().map(Resource::id).collect();
        let rows = Rc::new(visible);

        let on_toggle = {
            let state = state.clone();
            Callback::from(move |id| state.dispatch(ListAction::ToggleRow(id)))
        };
        let on_toggle_all = {
            let state = state.clone();
            Callback::from(move |_: ()| {
                state.dispatch(ListAction::ToggleAll(visible_ids.clone()))
            })
        };
        let actions = {
            let state = state.clone();
            let row_extra = props.row_extra.clone();
            Callback::from(move |row: R| {
                let id = row.id();
                let on_edit = {
                    let state = state.clone();
                    Callback::from(move |_: MouseEvent| {
                        state.dispatch(ListAction::OpenUpdate(id))
                    })
                };
                let on_delete = {
                    let state = state.clone();
                    Callback::from(move |_: MouseEvent| {
                        state.dispatch(ListAction::AskDelete(id))
                    })
                };
                html! {
                    <div class="inline-flex gap-2">
                        {row_extra.as_ref().map(|extra| extra.emit(row.clone())).unwrap_or_default()}
                        if can_edit {
                            <button onclick={on_edit} class="text-sm underline">{"Edit"}</button>
                            <button onclick={on_delete} class="text-sm text-red-600 underline">
                                {"Delete"}
                            </button>
                        }
                    </div>
                }
            })
        };

        html! {
            <div class="space-y-3">
                <div class="flex items-center gap-3 text-sm text-neutral-600 dark:text-neutral-400">
                    <span>{format!("{} of {} shown", rows.len(), records.len())}</span>
                    if refreshing {
                        <span>{"Refreshing..."}</span>
                    }
                    <span class="flex-1" />
                    <ExportButton<R> rows={rows.clone()} />
                </div>
                <DataTable<R>
                    rows={rows}
                    columns={props.columns.clone()}
                    lookups={props.lookups.clone()}
                    selectable={can_edit}
                    selected={state.selected.clone()}
                    {on_toggle}
                    {on_toggle_all}
                    actions={Some(actions)}
                />
            </div>
        }
    });

    let dialog = match state.dialog {
        ListDialog::None => html! {},
        ListDialog::Filter => {
            let on_apply = {
                let state = state.clone();
                Callback::from(move |filter| state.dispatch(ListAction::SetFilter(filter)))
            };
            html! {
                <FilterDrawer<R>
                    active={state.filter.clone()}
                    lookups={props.lookups.clone()}
                    {on_apply}
                    on_close={close.clone()}
                />
            }
        }
        ListDialog::Create => {
            let mut initial = R::Create::initial_values();
            for (name, value) in props.create_values.iter() {
                initial.set(name, value);
            }
            let on_submit = {
                let create = create.trigger();
                let succeeded = succeeded.clone();
                Callback::from(move |form| create.emit((form, succeeded.clone())))
            };
            html! {
                <FormDialog<R::Create>
                    title={format!("New {}", R::NOUN)}
                    {initial}
                    opening={state.opening}
                    lookups={props.lookups.clone()}
                    is_running={create.status.is_running()}
                    {on_submit}
                    on_close={close.clone()}
                />
            }
        }
        ListDialog::Update(id) => {
            let initial = detail
                .data
                .as_ref()
                .map(|record| record.edit_values())
                .unwrap_or_default();
            let on_submit = {
                let update = update.trigger();
                let succeeded = succeeded.clone();
                Callback::from(move |form| update.emit(((id, form), succeeded.clone())))
            };
            html! {
                <FormDialog<R::Update>
                    title={format!("Edit {}", R::NOUN)}
                    {initial}
                    opening={state.opening}
                    ready={detail.data.is_some() && !detail.is_loading}
                    load_error={detail.error.clone().map(AttrValue::from)}
                    lookups={props.lookups.clone()}
                    is_running={update.status.is_running()}
                    {on_submit}
                    on_close={close.clone()}
                />
            }
        }
        ListDialog::ConfirmDelete(id) => {
            let label = list
                .data
                .as_ref()
                .and_then(|records| records.iter().find(|r| r.id() == id))
                .map(Resource::label)
                .unwrap_or_else(|| id.to_string());
            let on_confirm = {
                let delete = delete.trigger();
                let succeeded = succeeded.clone();
                Callback::from(move |_: ()| delete.emit((id, succeeded.clone())))
            };
            html! {
                <ConfirmDialog
                    title={format!("Delete {}", R::NOUN)}
                    message={format!("\"{label}\" will be deleted.")}
                    {on_confirm}
                    on_close={close.clone()}
                    is_running={delete.status.is_running()}
                />
            }
        }
        ListDialog::ConfirmDeleteMany => {
            let ids = state.selected.clone();
            let count = ids.len();
            let on_confirm = {
                let delete_many = delete_many.trigger();
                let succeeded = succeeded.clone();
                Callback::from(move |_: ()| {
                    delete_many.emit((ids.clone(), succeeded.clone()))
                })
            };
            html! {
                <ConfirmDialog
                    title={format!("Delete {count} records")}
                    message={format!("{count} selected {} will be deleted.", R::TITLE.to_lowercase())}
                    {on_confirm}
                    on_close={close.clone()}
                    is_running={delete_many.status.is_running()}
                />
            }
        }
        ListDialog::Import => {
            let on_import = {
                let import = import.trigger();
                let succeeded = succeeded.clone();
                Callback::from(move |rows| import.emit((rows, succeeded.clone())))
            };
            html! {
                <ImportDialog
                    title={format!("Import {}", R::TITLE.to_lowercase())}
                    fields={R::IMPORT_FIELDS}
                    {on_import}
                    on_close={close.clone()}
                    is_running={import.status.is_running()}
                />
            }
        }
    };

    let filter_label = if state.filter.is_some() { "Filter (on)" } else { "Filter" };

    html! {
        <section class="space-y-4">
            <div class="flex flex-wrap items-center gap-3">
                <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100 mr-auto">
                    {title}
                </h1>
                <button onclick={dispatch(|| ListAction::OpenFilter)} class="px-3 py-2 text-sm border rounded-md">
                    {filter_label}
                </button>
                if can_edit && R::supports_import() {
                    <button onclick={dispatch(|| ListAction::OpenImport)} class="px-3 py-2 text-sm border rounded-md">
                        {"Import CSV"}
                    </button>
                }
                if can_edit && !state.selected.is_empty() {
                    <button
                        onclick={dispatch(|| ListAction::AskDeleteMany)}
                        class="px-3 py-2 text-sm text-white bg-red-600 rounded-md"
                    >
                        {format!("Delete selected ({})", state.selected.len())}
                    </button>
                }
                if can_edit {
                    <button
                        onclick={dispatch(|| ListAction::OpenCreate)}
                        class="px-3 py-2 text-sm text-white bg-neutral-900 dark:bg-neutral-100
                               dark:text-neutral-900 rounded-md"
                    >
                        {format!("New {}", R::NOUN)}
                    </button>
                }
            </div>
            {body}
            {dialog}
        </section>
    }
}

/// A write went through: one success message, one reload of the list.
fn settle_write(
    message: &str,
    noun: &str,
    notify: &Callback<String>,
    refetch: &Callback<()>,
) {
    let message = match message.trim() {
        "" => format!("{} saved", capitalize(noun)),
        message => message.to_string(),
    };
    notify.emit(message);
    refetch.emit(());
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use yew::Callback;

    use super::{capitalize, settle_write};

    #[test]
    fn a_write_refetches_exactly_once() {
        let refetches = Rc::new(Cell::new(0));
        let messages = Rc::new(RefCell::new(Vec::new()));
        let refetch = {
            let refetches = refetches.clone();
            Callback::from(move |_: ()| refetches.set(refetches.get() + 1))
        };
        let notify = {
            let messages = messages.clone();
            Callback::from(move |m: String| messages.borrow_mut().push(m))
        };

        settle_write("Leave created successfully", "leave", &notify, &refetch);
        assert_eq!(refetches.get(), 1);
        settle_write("", "leave type", &notify, &refetch);
        assert_eq!(refetches.get(), 2);
        assert_eq!(
            *messages.borrow(),
            ["Leave created successfully", "Leave type saved"]
        );
    }

    #[test]
    fn capitalizes_the_first_letter_only() {
        assert_eq!(capitalize("leave type"), "Leave type");
        assert_eq!(capitalize(""), "");
    }
}
