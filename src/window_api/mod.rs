//! Contains logic for inspecting the foreground window in different environments.
//! [GenericForegroundInspector] is the main artifact of this module that abstracts
//! the operations, [process::SysinfoProcessResolver] turns the owning pid into a name.

pub mod process;
#[cfg(feature = "win")]
pub mod win;
#[cfg(feature = "x11")]
pub mod x11;

#[cfg(feature = "win")]
extern crate windows;

#[cfg(feature = "x11")]
extern crate xcb;

use anyhow::Result;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForegroundWindow {
    /// Native handle of the window (HWND on Windows, X11 window id on Linux).
    pub window_id: u64,
    /// Process owning the window. Some windows don't advertise one.
    pub process_id: Option<u32>,
    /// Name of the window. For example 'bash in hello' or 'Document 1' or 'Vibing in YouTube -
    /// Chrome'
    pub title: String,
}

/// Intended to serve as a contract windows and linux systems must implement.
///
/// Implementations never fail: anything that goes wrong while talking to the OS degrades to
/// `None`, meaning there is no foreground window this time.
#[cfg_attr(test, automock)]
pub trait ForegroundInspector: Send {
    fn current_foreground(&mut self) -> Option<ForegroundWindow>;
}

/// Serves as a cross-compatible ForegroundInspector implementation.
pub struct GenericForegroundInspector {
    inner: Box<dyn ForegroundInspector>,
}

impl GenericForegroundInspector {
    pub fn new() -> Result<Self> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "win")] {
                use win::WindowsForegroundInspector;
                Ok(Self {
                    inner: Box::new(WindowsForegroundInspector::new()),
                })
            }
            else if #[cfg(feature = "x11")] {
                use x11::X11ForegroundInspector;
                Ok(Self {
                    inner: Box::new(X11ForegroundInspector::new()?),
                })
            }
            else {
                Err(anyhow::anyhow!(
                    "No window backend was compiled in. Rebuild with the `win` or `x11` feature"
                ))
            }
        }
    }
}

impl ForegroundInspector for GenericForegroundInspector {
    fn current_foreground(&mut self) -> Option<ForegroundWindow> {
        self.inner.current_foreground()
    }
}
