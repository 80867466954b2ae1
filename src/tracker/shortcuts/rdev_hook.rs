use rdev::{listen, EventType};
use tracing::{info, warn};

use super::{keys::Key, KeyEvent, ShortcutListener};

pub(super) fn spawn(mut listener: ShortcutListener) {
    let spawned = std::thread::Builder::new()
        .name("shortcut-listener".into())
        .spawn(move || {
            info!("Listening for global shortcuts");
            let result = listen(move |event| {
                let key_event = match event.event_type {
                    EventType::KeyPress(key) => translate(key).map(KeyEvent::Press),
                    EventType::KeyRelease(key) => translate(key).map(KeyEvent::Release),
                    _ => None,
                };
                if let Some(key_event) = key_event {
                    listener.on_key(key_event);
                }
            });
            if let Err(e) = result {
                warn!("Global shortcuts are unavailable {e:?}");
            }
        });
    if let Err(e) = spawned {
        warn!("Failed to start the shortcut thread {e:?}");
    }
}

fn translate(key: rdev::Key) -> Option<Key> {
    use rdev::Key as K;
    let key = match key {
        K::ControlLeft | K::ControlRight => Key::Ctrl,
        K::ShiftLeft | K::ShiftRight => Key::Shift,
        K::Alt | K::AltGr => Key::Alt,
        K::MetaLeft | K::MetaRight => Key::Meta,
        K::Space => Key::Space,
        K::Escape => Key::Escape,
        K::KeyA => Key::Char('a'),
        K::KeyB => Key::Char('b'),
        K::KeyC => Key::Char('c'),
        K::KeyD => Key::Char('d'),
        K::KeyE => Key::Char('e'),
        K::KeyF => Key::Char('f'),
        K::KeyG => Key::Char('g'),
        K::KeyH => Key::Char('h'),
        K::KeyI => Key::Char('i'),
        K::KeyJ => Key::Char('j'),
        K::KeyK => Key::Char('k'),
        K::KeyL => Key::Char('l'),
        K::KeyM => Key::Char('m'),
        K::KeyN => Key::Char('n'),
        K::KeyO => Key::Char('o'),
        K::KeyP => Key::Char('p'),
        K::KeyQ => Key::Char('q'),
        K::KeyR => Key::Char('r'),
        K::KeyS => Key::Char('s'),
        K::KeyT => Key::Char('t'),
        K::KeyU => Key::Char('u'),
        K::KeyV => Key::Char('v'),
        K::KeyW => Key::Char('w'),
        K::KeyX => Key::Char('x'),
        K::KeyY => Key::Char('y'),
        K::KeyZ => Key::Char('z'),
        K::Num0 => Key::Char('0'),
        K::Num1 => Key::Char('1'),
        K::Num2 => Key::Char('2'),
        K::Num3 => Key::Char('3'),
        K::Num4 => Key::Char('4'),
        K::Num5 => Key::Char('5'),
        K::Num6 => Key::Char('6'),
        K::Num7 => Key::Char('7'),
        K::Num8 => Key::Char('8'),
        K::Num9 => Key::Char('9'),
        K::F1 => Key::Function(1),
        K::F2 => Key::Function(2),
        K::F3 => Key::Function(3),
        K::F4 => Key::Function(4),
        K::F5 => Key::Function(5),
        K::F6 => Key::Function(6),
        K::F7 => Key::Function(7),
        K::F8 => Key::Function(8),
        K::F9 => Key::Function(9),
        K::F10 => Key::Function(10),
        K::F11 => Key::Function(11),
        K::F12 => Key::Function(12),
        _ => return None,
    };
    Some(key)
}
