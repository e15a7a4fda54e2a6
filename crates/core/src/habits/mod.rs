//! Habit list access

pub mod ports;
