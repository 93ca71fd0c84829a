pub mod score_report;
pub mod score_request;

pub use score_report::ScoreReport;
pub use score_request::ScoreRequest;
