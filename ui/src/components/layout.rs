use payloads::Role;
use payloads::access;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::hooks::use_logout;
use crate::session::AuthSession;
use crate::{Route, State};

/// Sidebar entries in display order.
const NAV: &[(&str, Route)] = &[
    ("Dashboard", Route::Dashboard),
    ("My dashboard", Route::PrivateDashboard),
    ("My dashboard", Route::ClientDashboard),
    ("Employees", Route::Employees),
    ("Departments", Route::Departments),
    ("Designations", Route::Designations),
    ("Clients", Route::Clients),
    ("Attendance", Route::Attendance),
    ("Leaves", Route::Leaves),
    ("Leave types", Route::LeaveTypes),
    ("Holidays", Route::Holidays),
    ("Contracts", Route::Contracts),
    ("Contract types", Route::ContractTypes),
    ("Projects", Route::Projects),
    ("Milestones", Route::Milestones),
    ("Tasks", Route::Tasks),
    ("Time logs", Route::TimeLogs),
    ("Job applications", Route::JobApplications),
    ("Interviews", Route::Interviews),
    ("Notice boards", Route::NoticeBoards),
    ("Events", Route::Events),
    ("Rooms", Route::Rooms),
    ("Sticky notes", Route::StickyNotes),
    ("Notifications", Route::Notifications),
];

/// The sections `role` may open.
pub fn visible_sections(role: Role) -> Vec<(&'static str, Route)> {
    NAV.iter()
        .filter(|(_, route)| {
            access::check(Some(role), &route.to_path()).is_allowed()
        })
        .cloned()
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct MainLayoutProps {
    pub session: AuthSession,
    pub children: Html,
}

#[function_component]
pub fn MainLayout(props: &MainLayoutProps) -> Html {
    let (state, _) = use_store::<State>();
    let route = use_route::<Route>();
    let on_logout = use_logout();
    let user = &props.session.user;

    html! {
        <div class="min-h-screen flex bg-white dark:bg-neutral-900 text-neutral-900 dark:text-neutral-100">
            <nav class="w-56 shrink-0 border-r border-neutral-200 dark:border-neutral-700 p-4 space-y-1">
                <p class="text-lg font-semibold mb-4">{"StaffDesk"}</p>
                {for visible_sections(user.role).into_iter().map(|(label, target)| {
                    let active = route.as_ref() == Some(&target);
                    let class = if active {
                        "block px-3 py-2 rounded-md text-sm bg-neutral-100 dark:bg-neutral-800 font-medium"
                    } else {
                        "block px-3 py-2 rounded-md text-sm hover:bg-neutral-50 dark:hover:bg-neutral-800"
                    };
                    html! {
                        <Link<Route> to={target} classes={classes!(class)}>{label}</Link<Route>>
                    }
                })}
            </nav>
            <div class="flex-1 min-w-0">
                <header class="flex items-center justify-end gap-4 h-14 px-6 border-b
                               border-neutral-200 dark:border-neutral-700">
                    <span class="text-sm">
                        {&user.name}
                        <span class="ml-2 text-xs text-neutral-500">{user.role.to_string()}</span>
                    </span>
                    if let Some(avatar) = &user.avatar {
                        <img src={avatar.url.clone()} alt="" class="h-8 w-8 rounded-full object-cover" />
                    }
                    <button onclick={on_logout} class="text-sm underline">{"Log out"}</button>
                </header>
                <main class="p-6">
                    {props.children.clone()}
                </main>
            </div>
            if state.busy > 0 {
                <div class="fixed inset-0 z-[70] flex items-center justify-center bg-white/40 dark:bg-black/40">
                    <div class="h-10 w-10 rounded-full border-4 border-neutral-300 border-t-neutral-900 animate-spin" />
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(role: Role) -> Vec<&'static str> {
        visible_sections(role).into_iter().map(|(l, _)| l).collect()
    }

    #[test]
    fn clients_see_no_staff_sections() {
        let sections = labels(Role::Client);
        assert!(!sections.contains(&"Employees"));
        assert!(!sections.contains(&"Attendance"));
        assert!(!sections.contains(&"Sticky notes"));
        assert!(sections.contains(&"Projects"));
        assert!(!sections.contains(&"Dashboard"));
        assert_eq!(sections.iter().filter(|l| **l == "My dashboard").count(), 1);
    }

    #[test]
    fn employees_see_their_sections() {
        let sections = labels(Role::Employee);
        assert!(sections.contains(&"Attendance"));
        assert!(sections.contains(&"Sticky notes"));
        assert!(!sections.contains(&"Contracts"));
        assert!(!sections.contains(&"Job applications"));
        assert!(!sections.contains(&"Dashboard"));
        assert_eq!(sections.iter().filter(|l| **l == "My dashboard").count(), 1);
    }

    #[test]
    fn admins_see_everything() {
        let sections = labels(Role::Admin);
        assert!(sections.contains(&"Employees"));
        assert!(sections.contains(&"Contracts"));
        // the company dashboard and the staff one
        assert!(sections.contains(&"Dashboard"));
        assert_eq!(sections.iter().filter(|l| **l == "My dashboard").count(), 1);
    }
}
