pub mod controller;
pub mod error;
pub mod port;
pub mod simulated;

pub use controller::{FormController, FormSnapshot};
pub use error::SubmissionError;
pub use port::{NavigationPort, SubmissionPort};
pub use simulated::SimulatedSubmission;
