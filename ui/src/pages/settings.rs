//! Small reference lists other records point at.

use std::rc::Rc;

use payloads::responses::{ContractType, Department, Designation, LeaveType};
use yew::prelude::*;

use super::PageProps;
use crate::components::{Column, ResourceListPage, cells};

#[function_component]
pub fn ContractTypesPage(props: &PageProps) -> Html {
    let columns = Rc::new(vec![Column::<ContractType>::new("Name", |t, _| {
        cells::text(&t.name)
    })]);
    html! { <ResourceListPage<ContractType> session={props.session.clone()} {columns} /> }
}

#[function_component]
pub fn DesignationsPage(props: &PageProps) -> Html {
    let columns = Rc::new(vec![Column::<Designation>::new("Name", |d, _| {
        cells::text(&d.name)
    })]);
    html! { <ResourceListPage<Designation> session={props.session.clone()} {columns} /> }
}

#[function_component]
pub fn DepartmentsPage(props: &PageProps) -> Html {
    let columns = Rc::new(vec![Column::<Department>::new("Name", |d, _| {
        cells::text(&d.name)
    })]);
    html! { <ResourceListPage<Department> session={props.session.clone()} {columns} /> }
}

#[function_component]
pub fn LeaveTypesPage(props: &PageProps) -> Html {
    type C = Column<LeaveType>;
    let columns = Rc::new(vec![
        C::new("Name", |t, _| cells::text(&t.name)),
        C::new("Color", |t, _| cells::badge(&t.color_code, &t.color_code)),
    ]);
    html! { <ResourceListPage<LeaveType> session={props.session.clone()} {columns} /> }
}
