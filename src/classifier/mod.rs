//! Classifier backends
//!
//! Every backend sits behind [`TextClassifier`] so the pipeline can run
//! against real model processes or scripted fakes interchangeably.

mod client;
mod mock;
mod process;

pub use client::{ClassifierError, TextClassifier};
pub use mock::{MockClassifier, MockResponse};
pub use process::{ProcessClassifier, ProcessOutput, DEFAULT_PROGRAM, DEFAULT_PROGRAM_ARGS};
