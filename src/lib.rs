//! In-memory chat-log datasets: one CSV per chat session, indexed by a
//! master description CSV. Sessions carry label metadata, records can grow
//! derived feature columns, and sessions are selected by exact label match.

pub mod data;

pub use data::filter::{LabelFilter, filter_by_labels, label_filter};
pub use data::loader::{
    FILE_NAME_COLUMN, LoadOptions, find_description_files, load_dataset, load_session,
};
pub use data::model::{ChatDataset, ChatSession, ColumnError, Record};
