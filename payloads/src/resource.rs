//! The contract every list page is built on.
//!
//! A [`Resource`] is a record type together with where it lives on the api,
//! how its envelope names it, which forms create and update it, how its
//! rows are filtered and which columns go into a CSV export.

use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::csv_io::{CsvColumn, CsvRecord};
use crate::filters::RecordFilter;
use crate::forms::{FormModel, FormValues};

pub trait Resource:
    Clone + PartialEq + Serialize + DeserializeOwned + CsvRecord + 'static
{
    /// Endpoint path relative to `/api/`, e.g. `leave-types`.
    const PATH: &'static str;
    /// Envelope key for one record, e.g. `leaveType`.
    const SINGULAR: &'static str;
    /// Envelope key for a list, e.g. `leaveTypes`. Also the key bulk bodies
    /// are sent under.
    const PLURAL: &'static str;
    /// Page heading.
    const TITLE: &'static str;
    /// One record in prose, e.g. `leave type`.
    const NOUN: &'static str;
    /// Columns written by a CSV export, in order.
    const CSV_COLUMNS: &'static [CsvColumn];
    /// Headers a CSV import may use. Empty when the entity can't be imported.
    const IMPORT_FIELDS: &'static [&'static str] = &[];

    type Id: Copy
        + Display
        + FromStr
        + PartialEq
        + Serialize
        + DeserializeOwned
        + 'static;
    type Create: FormModel + Serialize + PartialEq + 'static;
    type Update: FormModel + Serialize + PartialEq + 'static;
    type Filter: RecordFilter<Self>;

    fn id(&self) -> Self::Id;

    /// Short text naming the record in lookups and confirmations.
    fn label(&self) -> String;

    /// Form values an update dialog starts from.
    fn edit_values(&self) -> FormValues;

    fn detail_path(id: Self::Id) -> String {
        format!("{}/{id}", Self::PATH)
    }

    fn supports_import() -> bool {
        !Self::IMPORT_FIELDS.is_empty()
    }
}
