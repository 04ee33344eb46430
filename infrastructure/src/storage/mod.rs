//! Local answer bank persistence

mod json_file;

pub use json_file::JsonFileBankStore;
