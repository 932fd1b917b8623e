use std::rc::Rc;

use payloads::filters::{self, NotificationFilter};
use payloads::realtime::Room;
use payloads::responses::{MutationResponse, Notification};
use payloads::{EmployeeId, NotificationId};
use yew::prelude::*;
use yew_router::prelude::*;

use super::PageProps;
use crate::Route;
use crate::get_api_client;
use crate::hooks::{use_mutation, use_query, use_realtime_refresh};
use crate::session::AuthSession;

/// The current user's notifications, newest first. New ones arrive over
/// the user's own notification room.
#[function_component]
pub fn NotificationsPage(props: &PageProps) -> Html {
    let session = &props.session;
    let unread_only = use_state(|| false);
    let notifications = use_query(Some("notifications/current-user".into()), |_| async move {
        get_api_client().notifications_by_current_user().await
    });
    use_realtime_refresh(
        session.clone(),
        Some(Room::Notification(EmployeeId(session.user.id))),
        notifications.refetch.clone(),
    );

    let delete = use_mutation(
        |id: NotificationId| async move { get_api_client().delete_notification(id).await },
        session.toast.error_callback(),
    );

    let on_toggle = {
        let unread_only = unread_only.clone();
        Callback::from(move |_: Event| unread_only.set(!*unread_only))
    };

    let trigger = delete.trigger();
    let busy = delete.status.is_running();
    let body = notifications.render("notifications", |all, refreshing| {
        let filter = unread_only.then_some(NotificationFilter::Unread);
        let mut shown = filters::apply(filter.as_ref(), all);
        shown.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if shown.is_empty() {
            return html! { <p class="text-sm text-neutral-500 py-8 text-center">{"No notifications"}</p> };
        }
        html! {
            <ul class="divide-y divide-neutral-200 dark:divide-neutral-700 border rounded-lg">
                if refreshing {
                    <li class="px-4 py-2 text-sm text-neutral-500">{"Refreshing..."}</li>
                }
                {for shown.into_iter().map(|n| {
                    notification_row(n, &trigger, session, &notifications.refetch, busy)
                })}
            </ul>
        }
    });

    html! {
        <section class="space-y-4">
            <div class="flex items-center gap-4">
                <h1 class="text-2xl font-bold mr-auto">{"Notifications"}</h1>
                <label class="text-sm flex items-center gap-2">
                    <input type="checkbox" checked={*unread_only} onchange={on_toggle} />
                    {"Unread only"}
                </label>
            </div>
            {body}
        </section>
    }
}

fn notification_row(
    notification: &Notification,
    delete: &Callback<(NotificationId, Callback<Rc<MutationResponse<Notification>>>)>,
    session: &AuthSession,
    refetch: &Callback<()>,
    busy: bool,
) -> Html {
    let on_delete = {
        let delete = delete.clone();
        let toast = session.toast.clone();
        let refetch = refetch.clone();
        let id = notification.id;
        Callback::from(move |_: MouseEvent| {
            let toast = toast.clone();
            let refetch = refetch.clone();
            let on_success =
                Callback::from(move |response: Rc<MutationResponse<Notification>>| {
                    toast.success_or(&response.message, "Notification deleted");
                    refetch.emit(());
                });
            delete.emit((id, on_success));
        })
    };

    let content = match Route::recognize(&notification.url) {
        Some(route) if !notification.url.is_empty() => html! {
            <Link<Route> to={route} classes="underline">{&notification.content}</Link<Route>>
        },
        _ => html! { {&notification.content} },
    };

    html! {
        <li key={notification.id.to_string()} class="flex items-center gap-4 px-4 py-3">
            if !notification.read {
                <span class="h-2 w-2 rounded-full bg-blue-600" title="Unread" />
            }
            <div class="flex-1 text-sm">
                {content}
                <p class="text-xs text-neutral-500">
                    {notification.created_at.strftime("%Y-%m-%d %H:%M").to_string()}
                </p>
            </div>
            <button onclick={on_delete} disabled={busy} class="text-sm text-red-600 underline">
                {"Delete"}
            </button>
        </li>
    }
}
