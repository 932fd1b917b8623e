use std::rc::Rc;

use payloads::LeaveStatus;
use payloads::responses::{Employee, Holiday, Leave, LeaveType};
use yew::prelude::*;

use super::PageProps;
use crate::components::{Column, Lookups, ResourceListPage, cells};
use crate::hooks::use_options;

fn status_badge(status: LeaveStatus) -> Html {
    let color = match status {
        LeaveStatus::Approved => "#16a34a",
        LeaveStatus::Pending => "#d97706",
        LeaveStatus::Rejected => "#dc2626",
    };
    cells::badge(status, color)
}

#[function_component]
pub fn LeavesPage(props: &PageProps) -> Html {
    let lookups = Lookups::default()
        .with("employee", use_options::<Employee>())
        .with("leave_type", use_options::<LeaveType>());

    type C = Column<Leave>;
    let columns = Rc::new(vec![
        C::new("Employee", |l, lookups| cells::text(lookups.label("employee", l.employee))),
        C::new("Leave type", |l, lookups| {
            cells::text(lookups.label("leave_type", l.leave_type))
        }),
        C::new("Date", |l, _| cells::text(l.date)),
        C::new("Duration", |l, _| cells::text(l.duration)),
        C::new("Status", |l, _| status_badge(l.status)),
        C::new("Reason", |l, _| cells::text(&l.reason)),
    ]);

    html! {
        <ResourceListPage<Leave> session={props.session.clone()} {columns} {lookups} />
    }
}

#[function_component]
pub fn HolidaysPage(props: &PageProps) -> Html {
    type C = Column<Holiday>;
    let columns = Rc::new(vec![
        C::new("Date", |h, _| cells::text(h.date)),
        C::new("Day", |h, _| cells::text(h.date.strftime("%A"))),
        C::new("Occasion", |h, _| cells::text(&h.occasion)),
    ]);

    html! { <ResourceListPage<Holiday> session={props.session.clone()} {columns} /> }
}
