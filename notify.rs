/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! User-facing notifications.
//!
//! The app only queues `Toast`s; the host drains them and hands them to
//! whatever `ToastSink` it renders with.

use log::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }
}

pub trait ToastSink {
    fn show_toast(&mut self, toast: &Toast);
}

/// Sink that writes toasts to the log. Used by the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogToastSink;

impl ToastSink for LogToastSink {
    fn show_toast(&mut self, toast: &Toast) {
        match toast.kind {
            ToastKind::Success | ToastKind::Info => info!("{}", toast.message),
            ToastKind::Warning => warn!("{}", toast.message),
            ToastKind::Error => error!("{}", toast.message),
        }
    }
}

impl ToastSink for Vec<Toast> {
    fn show_toast(&mut self, toast: &Toast) {
        self.push(toast.clone());
    }
}
