use std::rc::Rc;

use payloads::NoticeBoardId;
use payloads::realtime::Room;
use payloads::responses::NoticeBoard;
use yew::prelude::*;
use yew_router::prelude::*;

use super::PageProps;
use crate::Route;
use crate::components::{Column, MarkdownText, ResourceListPage, cells};
use crate::hooks::{use_detail, use_realtime_refresh};
use crate::session::AuthSession;

#[function_component]
pub fn NoticeBoardsPage(props: &PageProps) -> Html {
    type C = Column<NoticeBoard>;
    let columns = Rc::new(vec![
        C::new("Heading", |n, _| html! {
            <Link<Route> to={Route::NoticeBoardDetail { id: n.id }} classes="underline">
                {&n.heading}
            </Link<Route>>
        }),
        C::new("For", |n, _| cells::text(n.notice_to)),
        C::new("Posted", |n, _| cells::text(n.created_at.strftime("%Y-%m-%d"))),
    ]);

    html! {
        <ResourceListPage<NoticeBoard>
            session={props.session.clone()}
            {columns}
            room={Some(Room::NoticeBoard)}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeBoardDetailProps {
    pub session: AuthSession,
    pub id: NoticeBoardId,
}

#[function_component]
pub fn NoticeBoardDetailPage(props: &NoticeBoardDetailProps) -> Html {
    let notice = use_detail::<NoticeBoard>(true, Some(props.id));
    use_realtime_refresh(
        props.session.clone(),
        Some(Room::NoticeBoard),
        notice.refetch.clone(),
    );

    let body = notice.render("notice", |notice, _| html! {
        <article class="space-y-3">
            <h1 class="text-2xl font-bold">{&notice.heading}</h1>
            <p class="text-sm text-neutral-600 dark:text-neutral-400">
                {format!("For {} · {}", notice.notice_to, notice.created_at.strftime("%Y-%m-%d"))}
            </p>
            <MarkdownText text={notice.details.clone()} />
        </article>
    });

    html! {
        <section class="space-y-4">
            <Link<Route> to={Route::NoticeBoards} classes="text-sm underline">{"All notices"}</Link<Route>>
            {body}
        </section>
    }
}
