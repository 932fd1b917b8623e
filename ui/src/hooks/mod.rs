pub mod use_authentication;
pub mod use_logout;
pub mod use_mutation;
pub mod use_options;
pub mod use_query;
pub mod use_realtime;
pub mod use_route_guard;

pub use use_authentication::use_authentication;
pub use use_logout::use_logout;
pub use use_mutation::{MutationHandle, MutationStatus, use_mutation};
pub use use_options::{use_jobs, use_options, use_status_columns};
pub use use_query::{QueryHandle, use_detail, use_list, use_query};
pub use use_realtime::{use_realtime_connection, use_realtime_refresh};
pub use use_route_guard::use_route_guard;
