//! Reminder bookkeeping adapters

pub mod json_ledger;

pub use json_ledger::JsonReminderLedger;
