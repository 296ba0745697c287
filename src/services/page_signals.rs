//! Signals scraped from hosted pages.
//!
//! Pages report unread counts through their document title (`"(3) Inbox"`) or an
//! IPC message. Media activity comes from an injected script posting IPC
//! messages. All of it is turned into `WindowEvent`s here.

use std::cell::Cell;

use serde::Deserialize;

use crate::types::events::WindowEvent;

/// Injected into every page; reports when camera/microphone capture starts and stops.
pub const MEDIA_WATCH_JS: &str = r#"(function(){
var md=navigator.mediaDevices;if(!md||!md.getUserMedia||!window.ipc)return;
var live=0,orig=md.getUserMedia.bind(md);
function post(){window.ipc.postMessage(JSON.stringify({cmd:'media',active:live>0}))}
md.getUserMedia=function(c){return orig(c).then(function(s){
live++;post();
s.getTracks().forEach(function(t){t.addEventListener('ended',function(){live=Math.max(0,live-1);post()})});
return s})}})();"#;

#[derive(Debug, Deserialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
enum IpcMessage {
    Media { active: bool },
    Unread { count: u32 },
}

/// Parses an IPC message body from a page. Unknown or malformed messages yield `None`.
pub fn parse_ipc(body: &str) -> Option<WindowEvent> {
    match serde_json::from_str::<IpcMessage>(body).ok()? {
        IpcMessage::Media { active } => Some(WindowEvent::MediaChanged(active)),
        IpcMessage::Unread { count } => Some(WindowEvent::UnreadCount(count)),
    }
}

/// Extracts a leading `(N)` unread counter from a document title.
pub fn unread_from_title(title: &str) -> Option<u32> {
    let rest = title.trim_start().strip_prefix('(')?;
    let (digits, _) = rest.split_once(')')?;
    digits.trim().trim_end_matches('+').parse().ok()
}

/// Turns successive titles of one page into unread counts.
///
/// Titles without a counter say nothing, so a count the page reported over IPC
/// survives them. Only a title dropping a counter it previously carried resets
/// the count to zero.
#[derive(Debug, Default)]
pub struct TitleUnread {
    had_counter: Cell<bool>,
}

impl TitleUnread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&self, title: &str) -> Option<u32> {
        match unread_from_title(title) {
            Some(count) => {
                self.had_counter.set(true);
                Some(count)
            }
            None if self.had_counter.replace(false) => Some(0),
            None => None,
        }
    }
}
