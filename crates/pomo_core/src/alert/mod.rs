#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::LinuxAlert;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WindowsAlert;

/// Completion cue played when an interval expires naturally. Strictly
/// fire-and-forget: implementations swallow their own failures.
pub trait Alert {
    fn work_complete(&self);
    fn break_complete(&self);
}

pub struct NoopAlert;

impl Alert for NoopAlert {
    fn work_complete(&self) {}

    fn break_complete(&self) {}
}

pub fn alert_from_env() -> Box<dyn Alert> {
    if std::env::var("POMOAPP_DISABLE_ALERTS").is_ok() {
        return Box::new(NoopAlert);
    }

    platform_alert()
}

#[cfg(target_os = "linux")]
fn platform_alert() -> Box<dyn Alert> {
    Box::new(LinuxAlert)
}

#[cfg(windows)]
fn platform_alert() -> Box<dyn Alert> {
    Box::new(WindowsAlert)
}

#[cfg(not(any(target_os = "linux", windows)))]
fn platform_alert() -> Box<dyn Alert> {
    Box::new(NoopAlert)
}
