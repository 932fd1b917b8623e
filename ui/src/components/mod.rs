pub mod confirm_dialog;
pub mod csv;
pub mod data_table;
pub mod fields;
pub mod filter_drawer;
pub mod form_dialog;
pub mod layout;
pub mod list_state;
pub mod markdown_text;
pub mod modal;
pub mod resource_list_page;
pub mod toasts;

pub use confirm_dialog::ConfirmDialog;
pub use data_table::{Column, DataTable, cells};
pub use fields::{FormField, Lookups, options_of};
pub use filter_drawer::FilterDrawer;
pub use form_dialog::FormDialog;
pub use layout::MainLayout;
pub use markdown_text::MarkdownText;
pub use modal::Modal;
pub use resource_list_page::ResourceListPage;
pub use toasts::ToastContainer;
