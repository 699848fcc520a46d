mod csv_import;
mod detect;

pub(crate) use csv_import::{ExpenseImporter, ImportReport};
