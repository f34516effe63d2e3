use blogdesk::application::notify::{Toast, ToastKind};
use serde::Serialize;

use crate::client::CliError;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}

pub fn render_toast(toast: &Toast) -> String {
    let label = match toast.kind {
        ToastKind::Success => "ok",
        ToastKind::Error => "error",
    };
    format!("[{label}] {}", toast.text)
}

/// Toasts go to stderr so stdout stays machine-readable.
pub fn print_toasts(toasts: &[Toast]) {
    for toast in toasts {
        eprintln!("{}", render_toast(toast));
    }
}
