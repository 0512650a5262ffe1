mod outcome;
mod record;
mod result;
mod suite;

pub use outcome::Outcome;
pub use record::{TestCase, TestRun, TestRunTemplate};
pub use result::{RunSummary, TestCaseResult};
pub use suite::TestSuite;
