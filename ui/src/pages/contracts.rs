use std::rc::Rc;

use payloads::forms::FormValues;
use payloads::query::list_key;
use payloads::realtime::Room;
use payloads::responses::{
    Client, Contract, ContractFile, ContractType, Discussion, Employee,
    PublicContractLink,
};
use payloads::{ContractId, Resource, Role};
use wasm_bindgen_futures::JsFuture;
use yew::prelude::*;
use yew_router::prelude::*;

use super::PageProps;
use crate::components::{Column, Lookups, MarkdownText, ResourceListPage, cells};
use crate::contexts::ToastHandle;
use crate::hooks::{use_detail, use_mutation, use_options};
use crate::session::AuthSession;
use crate::{Route, get_api_client};

/// Where someone outside the app opens a shared contract.
pub fn public_contract_url(origin: &str, token: &str) -> String {
    format!("{origin}/contracts/public/{token}")
}

async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("{e:?}"))
}

fn share(origin: String, token: String, toast: ToastHandle) {
    let url = public_contract_url(&origin, &token);
    yew::platform::spawn_local(async move {
        match copy_to_clipboard(&url).await {
            Ok(()) => toast.success("Public link copied to the clipboard"),
            Err(e) => {
                tracing::debug!(error = %e, "clipboard unavailable");
                toast.success(format!("Public link: {url}"));
            }
        }
    });
}

#[function_component]
pub fn ContractsPage(props: &PageProps) -> Html {
    let session = &props.session;
    let lookups = Lookups::default()
        .with("client", use_options::<Client>())
        .with("contract_type", use_options::<ContractType>());

    let public_link = use_mutation(
        |id: ContractId| async move { get_api_client().public_contract_link(id).await },
        session.toast.error_callback(),
    );

    type C = Column<Contract>;
    let columns = Rc::new(vec![
        C::new("Subject", |c, _| cells::text(&c.subject)),
        C::new("Client", |c, l| cells::text(l.label("client", c.client))),
        C::new("Type", |c, _| {
            cells::opt(c.contract_type.as_ref().map(|t| &t.name))
        }),
        C::new("Value", |c, _| {
            cells::text(format!("{} {}", c.contract_value, c.currency))
        }),
        C::new("Start", |c, _| cells::text(c.start_date)),
        C::new("End", |c, _| cells::text(c.end_date)),
    ]);

    let row_extra = {
        let trigger = public_link.trigger();
        let toast = session.toast.clone();
        let can_share = session.role() == Role::Admin;
        Callback::from(move |contract: Contract| {
            let on_share = {
                let trigger = trigger.clone();
                let toast = toast.clone();
                let id = contract.id;
                Callback::from(move |_: MouseEvent| {
                    let toast = toast.clone();
                    let on_success = Callback::from(move |link: Rc<PublicContractLink>| {
                        let origin = web_sys::window()
                            .and_then(|w| w.location().origin().ok())
                            .unwrap_or_default();
                        share(origin, link.token.clone(), toast.clone());
                    });
                    trigger.emit((id, on_success));
                })
            };
            html! {
                <>
                    <Link<Route>
                        to={Route::ContractDiscussion { id: contract.id }}
                        classes="text-sm underline"
                    >
                        {"Discussion"}
                    </Link<Route>>
                    <Link<Route> to={Route::ContractFiles { id: contract.id }} classes="text-sm underline">
                        {"Files"}
                    </Link<Route>>
                    if can_share {
                        <button onclick={on_share} class="text-sm underline">{"Public link"}</button>
                    }
                </>
            }
        })
    };

    html! {
        <ResourceListPage<Contract>
            session={session.clone()}
            {columns}
            {lookups}
            row_extra={Some(row_extra)}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct ContractDiscussionProps {
    pub session: AuthSession,
    pub id: ContractId,
}

/// Values every reply starts from: the contract and who is writing.
pub fn reply_values(contract: ContractId, session_role: Role, user_id: i64) -> FormValues {
    let author = if session_role == Role::Client { "client" } else { "employee" };
    FormValues::new()
        .with("contract", contract.to_string())
        .with(author, user_id.to_string())
}

/// One contract with its discussion thread. Replies from anyone in the
/// contract's room show up without a reload.
#[function_component]
pub fn ContractDiscussionPage(props: &ContractDiscussionProps) -> Html {
    let session = &props.session;
    let contract = use_detail::<Contract>(true, Some(props.id));
    let lookups = Lookups::default()
        .with("employee", use_options::<Employee>())
        .with("client", use_options::<Client>());

    type C = Column<Discussion>;
    let columns = Rc::new(vec![
        C::new("Author", |d, l| {
            let author = match (d.employee, d.client) {
                (Some(employee), _) => l.label("employee", employee),
                (None, Some(client)) => l.label("client", client),
                (None, None) => String::new(),
            };
            cells::text(author)
        }),
        C::new("Reply", |d, _| html! { <MarkdownText text={d.content.clone()} /> }),
        C::new("Posted", |d, _| cells::text(d.created_at.strftime("%Y-%m-%d %H:%M"))),
    ]);

    let header = contract.render("contract", |contract, _| {
        html! {
            <div class="space-y-2">
                <Link<Route> to={Route::Contracts} classes="text-sm underline">{"All contracts"}</Link<Route>>
                <h1 class="text-2xl font-bold">{&contract.subject}</h1>
                <p class="text-sm text-neutral-600 dark:text-neutral-400">
                    {format!("{} to {}", contract.start_date, contract.end_date)}
                </p>
                if let Some(description) = &contract.description {
                    <MarkdownText text={description.clone()} />
                }
            </div>
        }
    });

    html! {
        <div class="space-y-6">
            {header}
            <ResourceListPage<Discussion>
                session={session.clone()}
                {columns}
                {lookups}
                title={AttrValue::from("Discussion")}
                query_key={list_key(true, "discussions", &[("contract", Some(props.id.to_string()))])}
                room={Some(Room::ContractDiscussion(props.id))}
                create_values={reply_values(props.id, session.role(), session.user.id)}
            />
        </div>
    }
}

/// Files attached to one contract.
#[function_component]
pub fn ContractFilesPage(props: &ContractDiscussionProps) -> Html {
    let contract = use_detail::<Contract>(true, Some(props.id));

    type C = Column<ContractFile>;
    let columns = Rc::new(vec![
        C::new("File", |f, _| cells::file(&f.file)),
        C::new("Uploaded", |f, _| cells::text(f.created_at.strftime("%Y-%m-%d %H:%M"))),
    ]);

    let header = contract.render("contract", |contract, _| html! {
        <div class="space-y-1">
            <Link<Route> to={Route::Contracts} classes="text-sm underline">{"All contracts"}</Link<Route>>
            <h1 class="text-2xl font-bold">{&contract.subject}</h1>
        </div>
    });

    html! {
        <div class="space-y-6">
            {header}
            <ResourceListPage<ContractFile>
                session={props.session.clone()}
                {columns}
                query_key={list_key(true, ContractFile::PATH, &[("contract", Some(props.id.to_string()))])}
                create_values={FormValues::new().with("contract", props.id.to_string())}
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_carries_the_token() {
        assert_eq!(
            public_contract_url("https://hr.acme.io", "abc123"),
            "https://hr.acme.io/contracts/public/abc123"
        );
    }

    #[test]
    fn replies_are_signed_by_the_right_kind_of_account() {
        let staff = reply_values(ContractId(4), Role::Manager, 9);
        assert_eq!(staff.get("contract"), "4");
        assert_eq!(staff.get("employee"), "9");
        assert!(staff.is_blank("client"));

        let client = reply_values(ContractId(4), Role::Client, 3);
        assert_eq!(client.get("client"), "3");
        assert!(client.is_blank("employee"));
    }
}
