use tracing::{debug, instrument};
use windows::Win32::{
    Foundation::{GetLastError, HWND},
    System::{
        Diagnostics::Debug::{
            FormatMessageW, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS,
        },
        SystemServices::{LANG_ENGLISH, SUBLANG_ENGLISH_US},
    },
    UI::WindowsAndMessaging::{GetForegroundWindow, GetWindowTextW, GetWindowThreadProcessId},
};
use windows::core::PWSTR;

use super::{ForegroundInspector, ForegroundWindow};

fn last_error_message() -> String {
    let err = unsafe { GetLastError() };
    let mut message_buffer = [0u16; 2048];
    let size = unsafe {
        FormatMessageW(
            FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
            None,
            err.0,
            LANG_ENGLISH | (SUBLANG_ENGLISH_US << 10),
            PWSTR::from_raw(message_buffer.as_mut_ptr()),
            message_buffer.len() as u32,
            None,
        )
    };
    if size == 0 {
        format!("error code {}", err.0)
    } else {
        String::from_utf16_lossy(&message_buffer[..size as usize])
            .trim_end()
            .to_string()
    }
}

unsafe fn get_window_title(window_handle: HWND, text: &mut [u16]) -> String {
    let len = unsafe { GetWindowTextW(window_handle, text) };
    String::from_utf16_lossy(&text[..len.max(0) as usize])
}

#[instrument]
pub fn get_foreground() -> Option<ForegroundWindow> {
    let window = unsafe { GetForegroundWindow() };

    if window.is_invalid() {
        debug!("No foreground window");
        return None;
    }

    let mut id = 0u32;
    unsafe { GetWindowThreadProcessId(window, Some(&mut id)) };
    let process_id = if id == 0 {
        debug!("Failed to get owning process {}", last_error_message());
        None
    } else {
        Some(id)
    };

    let mut text: [u16; 4096] = [0; 4096];
    let title = unsafe { get_window_title(window, &mut text) };

    Some(ForegroundWindow {
        window_id: window.0 as usize as u64,
        process_id,
        title,
    })
}

pub struct WindowsForegroundInspector {}

impl WindowsForegroundInspector {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for WindowsForegroundInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl ForegroundInspector for WindowsForegroundInspector {
    fn current_foreground(&mut self) -> Option<ForegroundWindow> {
        get_foreground()
    }
}
