pub mod check;
pub mod labels;
pub mod run;
