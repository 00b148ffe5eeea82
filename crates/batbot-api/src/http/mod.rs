//! Keep-alive HTTP surface for hosting platforms that ping the process.

pub mod router;
