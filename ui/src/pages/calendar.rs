//! Events and video call rooms.

use std::rc::Rc;

use payloads::realtime;
use payloads::responses::{Client, Employee, Event, Room};
use yew::prelude::*;

use super::PageProps;
use crate::components::{Column, Lookups, ResourceListPage, cells};
use crate::hooks::use_options;

#[function_component]
pub fn EventsPage(props: &PageProps) -> Html {
    let lookups = Lookups::default()
        .with("employees", use_options::<Employee>())
        .with("clients", use_options::<Client>());

    type C = Column<Event>;
    let columns = Rc::new(vec![
        C::new("Name", |e, _| cells::badge(&e.name, &e.color)),
        C::new("Where", |e, _| cells::text(&e.location)),
        C::new("Starts", |e, _| {
            cells::text(format!("{} {}", e.starts_on_date, e.starts_on_time.strftime("%H:%M")))
        }),
        C::new("Ends", |e, _| {
            cells::text(format!("{} {}", e.ends_on_date, e.ends_on_time.strftime("%H:%M")))
        }),
        C::new("Attendees", |e, l| {
            let mut names = vec![l.labels("employees", &e.employees)];
            names.push(l.labels("clients", &e.clients));
            names.retain(|n| !n.is_empty());
            cells::text(names.join(", "))
        }),
    ]);

    html! {
        <ResourceListPage<Event>
            session={props.session.clone()}
            {columns}
            {lookups}
            room={Some(realtime::Room::Event)}
        />
    }
}

#[function_component]
pub fn RoomsPage(props: &PageProps) -> Html {
    let lookups = Lookups::default().with("employees", use_options::<Employee>());

    type C = Column<Room>;
    let columns = Rc::new(vec![
        C::new("Title", |r, _| cells::text(&r.title)),
        C::new("Date", |r, _| cells::text(r.date)),
        C::new("Start", |r, _| cells::text(r.start_time.strftime("%H:%M"))),
        C::new("Minutes", |r, _| cells::text(r.duration)),
        C::new("Members", |r, l| cells::text(l.labels("employees", &r.employees))),
        C::new("Join", |r, _| html! {
            <a href={r.link.clone()} target="_blank" rel="noopener noreferrer" class="underline">
                {"Open"}
            </a>
        }),
    ]);

    html! {
        <ResourceListPage<Room> session={props.session.clone()} {columns} {lookups} />
    }
}
