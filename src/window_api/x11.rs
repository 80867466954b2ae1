use anyhow::{anyhow, Result};
use tracing::{instrument, warn};
use xcb::{
    x::{self, Atom, GetProperty, GrabServer, InternAtom, UngrabServer, Window, ATOM_ANY},
    Connection, Xid,
};

use super::{ForegroundInspector, ForegroundWindow};

fn intern_atom(conn: &Connection, name: &[u8]) -> Result<Atom> {
    let reply = conn.wait_for_reply(conn.send_request(&InternAtom {
        only_if_exists: false,
        name,
    }))?;
    Ok(reply.atom())
}

fn get_pid(conn: &Connection, window: Window, pid_atom: Atom) -> Result<Option<u32>> {
    let result = conn.wait_for_reply(conn.send_request(&GetProperty {
        delete: false,
        window,
        property: pid_atom,
        r#type: ATOM_ANY,
        long_offset: 0,
        long_length: 1,
    }))?;
    Ok(result.value::<u32>().first().copied())
}

fn get_active_window(conn: &Connection, root: Window, active_window_atom: Atom) -> Result<Option<Window>> {
    let result = conn.wait_for_reply(conn.send_request(&GetProperty {
        delete: false,
        window: root,
        property: active_window_atom,
        r#type: ATOM_ANY,
        long_offset: 0,
        long_length: 1,
    }))?;
    // Focus on the desktop reports window 0.
    Ok(result
        .value::<Window>()
        .first()
        .copied()
        .filter(|v| v.resource_id() != 0))
}

fn get_text_property(conn: &Connection, window: Window, property: Atom) -> Result<String> {
    let reply = conn.wait_for_reply(conn.send_request(&GetProperty {
        delete: false,
        window,
        property,
        r#type: ATOM_ANY,
        long_offset: 0,
        long_length: 1024,
    }))?;
    Ok(String::from_utf8_lossy(reply.value::<u8>()).into_owned())
}

pub struct X11ForegroundInspector {
    connection: Connection,
    preferred_screen: usize,
    active_window_atom: Atom,
    window_name_atom: Atom,
    pid_atom: Atom,
}

impl X11ForegroundInspector {
    pub fn new() -> Result<Self> {
        let (connection, preferred_screen) = xcb::Connection::connect(None)?;
        let active_window_atom = intern_atom(&connection, b"_NET_ACTIVE_WINDOW")?;
        let window_name_atom = intern_atom(&connection, b"_NET_WM_NAME")?;
        let pid_atom = intern_atom(&connection, b"_NET_WM_PID")?;
        Ok(Self {
            connection,
            preferred_screen: preferred_screen.max(0) as usize,
            active_window_atom,
            window_name_atom,
            pid_atom,
        })
    }

    #[instrument(skip(self))]
    fn get_foreground_inner(&self) -> Result<Option<ForegroundWindow>> {
        let setup = self.connection.get_setup();

        // Currently the application only supports 1 x11 screen.
        let root = setup
            .roots()
            .nth(self.preferred_screen)
            .ok_or_else(|| anyhow!("Screen {} is missing", self.preferred_screen))?
            .root();

        let Some(active_window) =
            get_active_window(&self.connection, root, self.active_window_atom)?
        else {
            return Ok(None);
        };

        let mut title = get_text_property(&self.connection, active_window, self.window_name_atom)?;
        if title.is_empty() {
            title = get_text_property(&self.connection, active_window, x::ATOM_WM_NAME)?;
        }
        let process_id = get_pid(&self.connection, active_window, self.pid_atom)?;

        Ok(Some(ForegroundWindow {
            window_id: active_window.resource_id() as u64,
            process_id,
            title,
        }))
    }
}

impl ForegroundInspector for X11ForegroundInspector {
    #[instrument(skip(self))]
    fn current_foreground(&mut self) -> Option<ForegroundWindow> {
        let _ = self.connection.send_request(&GrabServer {});
        let result = self.get_foreground_inner();
        let _ = self.connection.send_request(&UngrabServer {});
        // Requests are buffered. The grab must not outlive this call.
        if let Err(e) = self.connection.flush() {
            warn!("Failed to release the X server {e:?}");
        }

        result
            .inspect_err(|e| warn!("Failed to query the active window {e:?}"))
            .ok()
            .flatten()
    }
}
