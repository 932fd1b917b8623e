use std::rc::Rc;

use payloads::Resource;
use payloads::forms::FormValues;
use payloads::query::list_key;
use payloads::responses::StickyNote;
use yew::prelude::*;

use super::PageProps;
use crate::components::{Column, MarkdownText, ResourceListPage, cells};

/// The logged in staff member's own notes.
#[function_component]
pub fn StickyNotesPage(props: &PageProps) -> Html {
    let session = &props.session;
    let owner = session.user.id.to_string();

    type C = Column<StickyNote>;
    let columns = Rc::new(vec![
        C::new("Color", |n, _| html! {
            <span
                class="inline-block w-5 h-5 rounded"
                style={format!("background-color: {}", n.color)}
            />
        }),
        C::new("Note", |n, _| html! { <MarkdownText text={n.note.clone()} /> }),
        C::new("Updated", |n, _| cells::text(n.updated_at.strftime("%Y-%m-%d %H:%M"))),
    ]);

    html! {
        <ResourceListPage<StickyNote>
            session={session.clone()}
            {columns}
            query_key={list_key(true, StickyNote::PATH, &[("employee", Some(owner.clone()))])}
            create_values={FormValues::new().with("employee", owner)}
        />
    }
}
