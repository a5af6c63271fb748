// src/ui/mod.rs
use crate::client::Submission;

pub mod steps;
pub mod intro;
pub mod form;
pub mod results;
pub mod donut;

/// Side effects a view asks the app shell to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    PickImage,
    Submit(Submission),
    SaveAnnotatedImage,
    ExportReport,
}
