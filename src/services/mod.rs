pub mod digest_service;
pub mod email_service;
pub mod fetch_service;
pub mod report_service;

pub use digest_service::DigestService;
pub use email_service::EmailService;
pub use fetch_service::{FetchService, FetcherOptions, DEFAULT_PAGE_SIZE};
pub use report_service::ReportService;
