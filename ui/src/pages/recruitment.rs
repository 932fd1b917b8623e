use std::collections::BTreeSet;
use std::rc::Rc;

use payloads::forms::SelectOption;
use payloads::query::list_key;
use payloads::forms::FormValues;
use payloads::responses::{Employee, Interview, InterviewFile, Job, JobApplication};
use payloads::{InterviewId, InterviewStatus, JobApplicationStatus, Resource};
use yew::prelude::*;
use yew_router::prelude::*;

use super::PageProps;
use crate::Route;
use crate::components::{Column, Lookups, ResourceListPage, cells};
use crate::hooks::{use_detail, use_jobs, use_list, use_options};
use crate::session::AuthSession;

/// Distinct locations applicants gave, for the location filter.
pub fn location_options(applications: &[JobApplication]) -> Vec<SelectOption> {
    applications
        .iter()
        .filter_map(|a| a.location.as_deref())
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|l| SelectOption::new(l, l))
        .collect()
}

fn job_options(jobs: Option<&Vec<Job>>) -> Vec<SelectOption> {
    jobs.map(|jobs| {
        jobs.iter()
            .map(|j| SelectOption::new(j.id.to_string(), &j.title))
            .collect()
    })
    .unwrap_or_default()
}

fn application_badge(status: JobApplicationStatus) -> Html {
    let color = match status {
        JobApplicationStatus::Applied => "#2563eb",
        JobApplicationStatus::PhoneScreen | JobApplicationStatus::Interview => "#d97706",
        JobApplicationStatus::Hired => "#16a34a",
        JobApplicationStatus::Rejected => "#dc2626",
    };
    cells::badge(status, color)
}

#[function_component]
pub fn JobApplicationsPage(props: &PageProps) -> Html {
    let jobs = use_jobs();
    let applications = use_list::<JobApplication>(list_key(true, JobApplication::PATH, &[]));
    let locations = applications
        .data
        .as_deref()
        .map(|a| location_options(a))
        .unwrap_or_default();
    let lookups = Lookups::default()
        .with("jobs", job_options(jobs.data.as_deref()))
        .with("location", locations);

    type C = Column<JobApplication>;
    let columns = Rc::new(vec![
        C::new("Name", |a, _| cells::text(&a.name)),
        C::new("Email", |a, _| cells::text(&a.email)),
        C::new("Job", |a, l| match &a.job_title {
            Some(title) => cells::text(title),
            None => cells::text(l.label("jobs", a.jobs)),
        }),
        C::new("Location", |a, _| cells::opt(a.location.as_ref())),
        C::new("Status", |a, _| application_badge(a.status)),
        C::new("Applied", |a, _| cells::text(a.created_at.strftime("%Y-%m-%d"))),
    ]);

    html! {
        <ResourceListPage<JobApplication> session={props.session.clone()} {columns} {lookups} />
    }
}

#[function_component]
pub fn InterviewsPage(props: &PageProps) -> Html {
    let employees = use_options::<Employee>();
    let lookups = Lookups::default()
        .with("candidate", use_options::<JobApplication>())
        .with("interviewer", employees);

    type C = Column<Interview>;
    let columns = Rc::new(vec![
        C::new("Candidate", |i, l| cells::text(l.label("candidate", i.candidate))),
        C::new("Interviewers", |i, l| cells::text(l.labels("interviewer", &i.interviewer))),
        C::new("Date", |i, _| cells::text(i.date)),
        C::new("Time", |i, _| cells::text(i.start_time.strftime("%H:%M"))),
        C::new("Status", |i, _| {
            let color = match i.status {
                InterviewStatus::Pending => "#d97706",
                InterviewStatus::Hired | InterviewStatus::Completed => "#16a34a",
                InterviewStatus::Canceled | InterviewStatus::Rejected => "#dc2626",
            };
            cells::badge(i.status, color)
        }),
    ]);

    let row_extra = Callback::from(|interview: Interview| html! {
        <Link<Route> to={Route::InterviewFiles { id: interview.id }} classes="text-sm underline">
            {"Files"}
        </Link<Route>>
    });

    html! {
        <ResourceListPage<Interview>
            session={props.session.clone()}
            {columns}
            {lookups}
            row_extra={Some(row_extra)}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct InterviewFilesProps {
    pub session: AuthSession,
    pub id: InterviewId,
}

/// Files attached to one interview, like a candidate's resume.
#[function_component]
pub fn InterviewFilesPage(props: &InterviewFilesProps) -> Html {
    let interview = use_detail::<Interview>(true, Some(props.id));
    let candidates = use_options::<JobApplication>();

    type C = Column<InterviewFile>;
    let columns = Rc::new(vec![
        C::new("File", |f, _| cells::file(&f.file)),
        C::new("Uploaded", |f, _| cells::text(f.created_at.strftime("%Y-%m-%d %H:%M"))),
    ]);

    let header = interview.render("interview", |interview, _| {
        let candidate = candidates
            .iter()
            .find(|o| o.value == interview.candidate.to_string())
            .map(|o| o.label.clone())
            .unwrap_or_default();
        html! {
            <div class="space-y-1">
                <Link<Route> to={Route::Interviews} classes="text-sm underline">{"All interviews"}</Link<Route>>
                <h1 class="text-2xl font-bold">{candidate}</h1>
                <p class="text-sm text-neutral-600 dark:text-neutral-400">
                    {format!("{} at {}", interview.date, interview.start_time.strftime("%H:%M"))}
                </p>
            </div>
        }
    });

    html! {
        <div class="space-y-6">
            {header}
            <ResourceListPage<InterviewFile>
                session={props.session.clone()}
                {columns}
                query_key={list_key(true, InterviewFile::PATH, &[("interview", Some(props.id.to_string()))])}
                create_values={FormValues::new().with("interview", props.id.to_string())}
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use payloads::{JobApplicationId, JobId};

    fn application(id: i64, location: Option<&str>) -> JobApplication {
        JobApplication {
            id: JobApplicationId(id),
            name: format!("Applicant {id}"),
            email: format!("a{id}@mail.io"),
            mobile: None,
            jobs: JobId(1),
            job_title: None,
            location: location.map(str::to_string),
            skills: vec![],
            source: None,
            status: JobApplicationStatus::Applied,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn locations_are_distinct_and_sorted() {
        let applications = vec![
            application(1, Some("Hanoi")),
            application(2, Some(" Berlin ")),
            application(3, None),
            application(4, Some("Hanoi")),
            application(5, Some("")),
        ];
        let labels: Vec<String> = location_options(&applications)
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, vec!["Berlin", "Hanoi"]);
    }
}
