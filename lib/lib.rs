#![allow(dead_code, non_snake_case, non_upper_case_globals)]

pub mod error;
pub mod utils;
pub mod states;
pub mod layout;
pub mod postselect;
pub mod signal;
