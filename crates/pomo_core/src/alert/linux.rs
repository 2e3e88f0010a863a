use crate::alert::Alert;
use notify_rust::Notification;

pub struct LinuxAlert;

fn show(summary: &str, body: &str) {
    let result = Notification::new()
        .summary(summary)
        .body(body)
        .sound_name("complete")
        .show();
    // Missing notification daemon is not our problem.
    let _ = result;
}

impl Alert for LinuxAlert {
    fn work_complete(&self) {
        show("pomoapp", "Work session finished");
    }

    fn break_complete(&self) {
        show("pomoapp", "Break finished");
    }
}
