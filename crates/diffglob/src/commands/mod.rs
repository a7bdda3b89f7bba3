pub mod check;
pub mod completions;
