use crate::alert::Alert;
use tauri_winrt_notification::{Sound, Toast};

pub struct WindowsAlert;

fn show(line: &str) {
    let result = Toast::new(Toast::POWERSHELL_APP_ID)
        .title("pomoapp")
        .text1(line)
        .sound(Some(Sound::Default))
        .show();
    let _ = result;
}

impl Alert for WindowsAlert {
    fn work_complete(&self) {
        show("Work session finished");
    }

    fn break_complete(&self) {
        show("Break finished");
    }
}
