use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::{debug, instrument};

#[cfg(test)]
use mockall::automock;

/// Name reported when the process exited between sampling the window and resolving it.
pub const PROCESS_NOT_FOUND: &str = "Process not found";

/// Maps a process id to the name of its executable, e.g. `chrome.exe`.
///
/// Resolution never fails the poll cycle. A vanished process becomes [PROCESS_NOT_FOUND], any
/// other problem becomes a readable `Error: ...` string.
#[cfg_attr(test, automock)]
pub trait ProcessResolver: Send {
    fn resolve_process_name(&mut self, pid: u32) -> String;
}

/// [ProcessResolver] backed by sysinfo. Only the requested pid is refreshed, so a resolution
/// costs a single process lookup instead of a full system scan.
pub struct SysinfoProcessResolver {
    system: System,
}

impl SysinfoProcessResolver {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for SysinfoProcessResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessResolver for SysinfoProcessResolver {
    #[instrument(skip(self))]
    fn resolve_process_name(&mut self, pid: u32) -> String {
        let pid = Pid::from_u32(pid);
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        let Some(process) = self.system.process(pid) else {
            debug!("Process exited before its name was read");
            return PROCESS_NOT_FOUND.to_string();
        };

        match process.name().to_str() {
            Some(name) => name.to_string(),
            None => format!("Error: name of process {pid} is not valid unicode"),
        }
    }
}
