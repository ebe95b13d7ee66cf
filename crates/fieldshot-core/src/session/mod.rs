mod capture_target;
mod mode;
#[allow(clippy::module_inception)]
mod session;

pub use {capture_target::CaptureTarget, mode::Mode, session::Session};
