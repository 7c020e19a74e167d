pub mod handlers;
pub mod middleware;
pub mod report;
pub mod router;
