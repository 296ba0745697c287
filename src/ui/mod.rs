//! SuiteShell UI layer.
//!
//! Uses `wry` for the hosted web apps and `tao` for native windows:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! Everything above this layer talks to windows through `platform::native`.

pub mod webview_app;
