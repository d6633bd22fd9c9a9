//! Live reload hook backed by the server's change event stream.
//!
//! Subscribes to the reload SSE endpoint and bumps a generation counter
//! whenever the server reports that book sources changed on disk. Resources
//! that key on the returned signal refetch automatically. The browser's
//! EventSource retries dropped connections on its own; the hook only steps
//! in with a backoff timer once the browser gives up and closes the stream.
//!
//! Call this from the layout so a page load opens exactly one stream.

use dioxus::prelude::*;

/// Returns a monotonically increasing generation counter.
///
/// Starts at zero and increments once per server-side reload notification.
/// On non-wasm builds the counter never advances.
pub fn use_live_reload() -> Signal<u64> {
    let generation = use_signal(|| 0u64);

    #[cfg(target_arch = "wasm32")]
    {
        use crate::shared::constants::RELOAD_EVENTS_PATH;
        use std::cell::{Cell, RefCell};
        use std::rc::Rc;
        use wasm_bindgen::prelude::*;
        use web_sys::EventSource;

        // Bumped to tear down a dead stream and open a fresh one
        let mut retry = use_signal(|| 0u32);
        let failures = use_hook(|| Rc::new(Cell::new(0u32)));
        let stream = use_hook(|| Rc::new(RefCell::new(None::<EventSource>)));

        let generation_for_events = generation.clone();

        use_effect(move || {
            let _attempt = retry();

            if let Some(old) = stream.borrow_mut().take() {
                old.close();
            }

            let event_source = match EventSource::new(RELOAD_EVENTS_PATH) {
                Ok(es) => es,
                Err(e) => {
                    tracing::warn!("Failed to open reload event stream: {:?}", e);
                    schedule_reconnect(failures.clone(), retry.clone());
                    return;
                }
            };

            let failures_on_open = failures.clone();
            let onopen = Closure::wrap(Box::new(move |_: web_sys::Event| {
                tracing::debug!("Reload event stream connected");
                failures_on_open.set(0);
            }) as Box<dyn FnMut(_)>);
            event_source.set_onopen(Some(onopen.as_ref().unchecked_ref()));
            onopen.forget();

            // CONNECTING errors are retried by the browser itself; only a
            // CLOSED stream needs our own reconnect timer
            let stream_on_error = stream.clone();
            let failures_on_error = failures.clone();
            let retry_on_error = retry.clone();
            let onerror = Closure::wrap(Box::new(move |_: web_sys::Event| {
                let closed = stream_on_error
                    .borrow()
                    .as_ref()
                    .is_some_and(|es| es.ready_state() == EventSource::CLOSED);
                if closed {
                    tracing::warn!("Reload event stream closed, scheduling reconnect");
                    schedule_reconnect(failures_on_error.clone(), retry_on_error.clone());
                } else {
                    tracing::debug!("Reload event stream interrupted, browser is retrying");
                }
            }) as Box<dyn FnMut(_)>);
            event_source.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();

            let mut generation_inner = generation_for_events.clone();
            let onmessage = Closure::wrap(Box::new(move |event: web_sys::MessageEvent| {
                if let Some(data) = event.data().as_string() {
                    if let Ok(msg) = serde_json::from_str::<serde_json::Value>(&data) {
                        if msg.get("event_type").and_then(|v| v.as_str()) == Some("reload") {
                            let mut current = generation_inner.write();
                            *current += 1;
                            tracing::info!("Book sources changed (generation {})", *current);
                        }
                    }
                }
            }) as Box<dyn FnMut(_)>);
            event_source.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
            onmessage.forget();

            stream.replace(Some(event_source));
        });
    }

    generation
}

#[cfg(target_arch = "wasm32")]
fn schedule_reconnect(
    failures: std::rc::Rc<std::cell::Cell<u32>>,
    mut retry: Signal<u32>,
) {
    let delay = reconnect_delay_ms(failures.get());
    failures.set(failures.get() + 1);
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(delay).await;
        let mut attempt = retry.write();
        *attempt += 1;
    });
}

/// Exponential backoff for reopening a closed stream, capped at 30 s.
#[cfg(any(target_arch = "wasm32", test))]
fn reconnect_delay_ms(failures: u32) -> u32 {
    1000u32.saturating_mul(1 << failures.min(5)).min(30_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconnect_delay_doubles_then_caps() {
        assert_eq!(reconnect_delay_ms(0), 1000);
        assert_eq!(reconnect_delay_ms(1), 2000);
        assert_eq!(reconnect_delay_ms(4), 16_000);
        assert_eq!(reconnect_delay_ms(5), 30_000);
        assert_eq!(reconnect_delay_ms(50), 30_000);
    }
}
