// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Toast notification queue.
//!
//! Views render whatever is in the queue; this side only decides what gets
//! shown and for how long. Inside a tokio runtime each toast is popped by a
//! timer when its duration runs out. Expired toasts are also dropped
//! whenever the queue is read, so callers without a runtime see the same
//! queue.

use serde::Serialize;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

/// Display time when the caller doesn't pick one.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(4000);

/// Loading toasts stay up until the operation settles (or a minute passes).
pub const LOADING_DURATION: Duration = Duration::from_secs(60);

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Error,
    Loading,
}

/// Optional call-to-action rendered under the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<ToastLink>,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct ToastOptions {
    pub kind: Option<ToastKind>,
    pub duration: Option<Duration>,
    pub link: Option<ToastLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToastEvent {
    Pushed(Toast),
    Popped(u64),
}

/// Messages shown while a future runs and once it settles.
pub struct PromiseMessages<T, E> {
    pub loading: String,
    pub success: Box<dyn Fn(&T) -> String + Send + Sync>,
    pub error: Box<dyn Fn(&E) -> String + Send + Sync>,
}

impl<T, E> PromiseMessages<T, E> {
    /// Same text regardless of the outcome value.
    pub fn fixed(
        loading: impl Into<String>,
        success: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let success = success.into();
        let error = error.into();
        Self {
            loading: loading.into(),
            success: Box::new(move |_| success.clone()),
            error: Box::new(move |_| error.clone()),
        }
    }
}

struct Entry {
    toast: Toast,
    expires_at: Instant,
}

#[derive(Default)]
struct Queue {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Shared toast queue. Clones push into the same queue.
#[derive(Clone)]
pub struct Toaster {
    queue: Arc<Mutex<Queue>>,
    events: broadcast::Sender<ToastEvent>,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Toaster {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            queue: Arc::new(Mutex::new(Queue::default())),
            events,
        }
    }

    /// Show a toast and return its id.
    pub fn push(&self, message: impl Into<String>, options: ToastOptions) -> u64 {
        let toast = {
            let mut queue = self.lock();
            queue.next_id += 1;
            let toast = Toast {
                id: queue.next_id,
                kind: options.kind.unwrap_or(ToastKind::Info),
                message: message.into(),
                link: options.link,
                duration: options.duration.unwrap_or(DEFAULT_DURATION),
            };
            queue.entries.push(Entry {
                toast: toast.clone(),
                expires_at: Instant::now() + toast.duration,
            });
            toast
        };

        tracing::debug!(id = toast.id, kind = ?toast.kind, "Toast pushed");
        let id = toast.id;
        let duration = toast.duration;
        // No subscribers is fine; the queue is still the source of truth.
        let _ = self.events.send(ToastEvent::Pushed(toast));

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let toaster = self.clone();
            handle.spawn(async move {
                tokio::time::sleep(duration).await;
                if toaster.pop(id) {
                    tracing::debug!(id, "Toast expired");
                }
            });
        }
        id
    }

    /// Dismiss a toast. Returns `false` if it was already gone.
    pub fn pop(&self, id: u64) -> bool {
        let removed = {
            let mut queue = self.lock();
            let before = queue.entries.len();
            queue.entries.retain(|e| e.toast.id != id);
            queue.entries.len() != before
        };

        if removed {
            let _ = self.events.send(ToastEvent::Popped(id));
        }
        removed
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(
            message,
            ToastOptions {
                kind: Some(ToastKind::Success),
                ..Default::default()
            },
        )
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(
            message,
            ToastOptions {
                kind: Some(ToastKind::Error),
                ..Default::default()
            },
        )
    }

    /// Show a loading toast while `fut` runs, then replace it with the outcome.
    ///
    /// The future's result is handed back unchanged, errors included.
    pub async fn promise<T, E, F>(&self, fut: F, messages: PromiseMessages<T, E>) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let loading_id = self.push(
            messages.loading.clone(),
            ToastOptions {
                kind: Some(ToastKind::Loading),
                duration: Some(LOADING_DURATION),
                ..Default::default()
            },
        );

        let result = fut.await;
        self.pop(loading_id);

        match &result {
            Ok(value) => {
                self.success((messages.success)(value));
            }
            Err(err) => {
                self.error((messages.error)(err));
            }
        }
        result
    }

    /// Toasts currently on screen, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        let now = Instant::now();
        let (live, expired) = {
            let mut queue = self.lock();
            let (live, expired): (Vec<Entry>, Vec<Entry>) =
                queue.entries.drain(..).partition(|e| e.expires_at > now);
            queue.entries = live;
            let live: Vec<Toast> = queue.entries.iter().map(|e| e.toast.clone()).collect();
            (live, expired)
        };

        for entry in expired {
            let _ = self.events.send(ToastEvent::Popped(entry.toast.id));
        }
        live
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.events.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }
}

mod duration_ms {
    use serde::Serializer;
    use std::time::{Duration, Instant};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop() {
        let toaster = Toaster::new();
        let a = toaster.push("hola", ToastOptions::default());
        let b = toaster.error("falló");

        let toasts = toaster.toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].kind, ToastKind::Info);
        assert_eq!(toasts[0].duration, DEFAULT_DURATION);
        assert_eq!(toasts[1].kind, ToastKind::Error);

        assert!(toaster.pop(a));
        assert!(!toaster.pop(a));
        assert_eq!(toaster.toasts()[0].id, b);
    }

    #[tokio::test]
    async fn test_promise_success_replaces_loading() {
        let toaster = Toaster::new();
        let mut events = toaster.subscribe();

        let value = toaster
            .promise(
                async { Ok::<_, String>(42) },
                PromiseMessages {
                    loading: "Guardando…".to_string(),
                    success: Box::new(|v: &i32| format!("Guardado {}", v)),
                    error: Box::new(|e: &String| e.clone()),
                },
            )
            .await;

        assert_eq!(value, Ok(42));
        let toasts = toaster.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[0].message, "Guardado 42");

        match events.recv().await.unwrap() {
            ToastEvent::Pushed(t) => {
                assert_eq!(t.kind, ToastKind::Loading);
                assert_eq!(t.duration, LOADING_DURATION);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert!(matches!(events.recv().await.unwrap(), ToastEvent::Popped(_)));
    }

    #[tokio::test]
    async fn test_toast_expires_after_duration() {
        let toaster = Toaster::new();
        let mut events = toaster.subscribe();
        let id = toaster.push(
            "breve",
            ToastOptions {
                duration: Some(Duration::from_millis(10)),
                ..Default::default()
            },
        );
        toaster.success("sigue");

        tokio::time::sleep(Duration::from_millis(100)).await;

        let toasts = toaster.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "sigue");

        assert!(matches!(events.recv().await.unwrap(), ToastEvent::Pushed(t) if t.id == id));
        assert!(matches!(events.recv().await.unwrap(), ToastEvent::Pushed(_)));
        assert_eq!(events.recv().await.unwrap(), ToastEvent::Popped(id));
    }

    #[test]
    fn test_expired_toasts_dropped_without_runtime() {
        let toaster = Toaster::new();
        toaster.push(
            "breve",
            ToastOptions {
                duration: Some(Duration::from_millis(10)),
                ..Default::default()
            },
        );
        assert_eq!(toaster.toasts().len(), 1);

        std::thread::sleep(Duration::from_millis(50));
        assert!(toaster.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_promise_error_is_returned() {
        let toaster = Toaster::new();
        let result: Result<(), &str> = toaster
            .promise(
                async { Err("boom") },
                PromiseMessages::fixed("Cargando", "Listo", "Error al guardar"),
            )
            .await;

        assert_eq!(result, Err("boom"));
        let toasts = toaster.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].message, "Error al guardar");
    }
}
