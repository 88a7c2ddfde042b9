//! Unit tests for FrameLoop
//!
//! Tests construction, frame indexing, dispatch-then-render ordering
//! and failure reporting.
//!
//! Tests that swap the global logger are marked #[serial].

use super::*;
use crate::log::{self, Logger, LogEntry, LogSeverity};
use serial_test::serial;
use std::sync::Mutex;

// ============================================================================
// TEST HELPERS
// ============================================================================

type Events = Arc<Mutex<Vec<String>>>;

fn events() -> Events {
    Arc::new(Mutex::new(Vec::new()))
}

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn capture_logs() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    log::set_logger(TestLogger { entries: entries.clone() });
    entries
}

fn new_loop(dispatcher: &Arc<BeforeRenderDispatcher>) -> FrameLoop {
    FrameLoop::new(dispatcher.clone(), FrameLoopConfig::default()).unwrap()
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_new_frame_loop() {
    let dispatcher = Arc::new(BeforeRenderDispatcher::new());
    let frame_loop = new_loop(&dispatcher);

    assert_eq!(frame_loop.frame_index(), 0);
    assert!(Arc::ptr_eq(frame_loop.dispatcher(), &dispatcher));
    assert_eq!(frame_loop.config(), &FrameLoopConfig::default());
}

#[test]
fn test_new_rejects_invalid_config() {
    let dispatcher = Arc::new(BeforeRenderDispatcher::new());
    let config = FrameLoopConfig {
        log_source: String::new(),
        trace_dispatch: false,
    };

    let result = FrameLoop::new(dispatcher, config);
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

// ============================================================================
// RUN FRAME
// ============================================================================

#[test]
fn test_run_frame_dispatches_before_render() {
    let dispatcher = Arc::new(BeforeRenderDispatcher::new());
    let seen = events();

    let hook_events = seen.clone();
    dispatcher.register(move || {
        hook_events.lock().unwrap().push("hook".to_string());
        Ok(())
    }, 0);

    let mut frame_loop = new_loop(&dispatcher);
    let render_events = seen.clone();
    frame_loop.run_frame(|frame| {
        render_events.lock().unwrap().push(format!("render {}", frame));
        Ok(())
    }).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["hook".to_string(), "render 0".to_string()]);
}

#[test]
fn test_frame_index_advances() {
    let dispatcher = Arc::new(BeforeRenderDispatcher::new());
    let mut frame_loop = new_loop(&dispatcher);
    let mut rendered = Vec::new();

    for _ in 0..3 {
        frame_loop.run_frame(|frame| {
            rendered.push(frame);
            Ok(())
        }).unwrap();
    }

    assert_eq!(rendered, vec![0, 1, 2]);
    assert_eq!(frame_loop.frame_index(), 3);
}

#[test]
fn test_callbacks_registered_between_frames_take_effect() {
    let dispatcher = Arc::new(BeforeRenderDispatcher::new());
    let counter = Arc::new(Mutex::new(0u32));
    let mut frame_loop = new_loop(&dispatcher);

    frame_loop.run_frame(|_| Ok(())).unwrap();

    let hook_counter = counter.clone();
    let handle = dispatcher.register(move || {
        *hook_counter.lock().unwrap() += 1;
        Ok(())
    }, 0);
    frame_loop.run_frame(|_| Ok(())).unwrap();
    frame_loop.run_frame(|_| Ok(())).unwrap();

    dispatcher.unregister(handle, 0);
    frame_loop.run_frame(|_| Ok(())).unwrap();

    assert_eq!(*counter.lock().unwrap(), 2);
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
#[serial]
fn test_dispatch_failure_skips_render() {
    let entries = capture_logs();

    let dispatcher = Arc::new(BeforeRenderDispatcher::new());
    dispatcher.register(|| Err(Error::CallbackFailed("readback fence lost".to_string())), 3);

    let mut frame_loop = new_loop(&dispatcher);
    let mut rendered = false;
    let result = frame_loop.run_frame(|_| {
        rendered = true;
        Ok(())
    });

    assert!(matches!(result, Err(Error::CallbackFailed(ref msg)) if msg == "readback fence lost"));
    assert!(!rendered);
    assert_eq!(frame_loop.frame_index(), 1);

    let logged = entries.lock().unwrap().iter().any(|e| {
        e.severity == LogSeverity::Error
            && e.source == "frame_hooks::FrameLoop"
            && e.message.contains("readback fence lost")
            && e.line.is_some()
    });
    assert!(logged);

    log::reset_logger();
}

#[test]
#[serial]
fn test_render_failure_reported_as_frame_failed() {
    let entries = capture_logs();

    let dispatcher = Arc::new(BeforeRenderDispatcher::new());
    let mut frame_loop = new_loop(&dispatcher);
    frame_loop.run_frame(|_| Ok(())).unwrap();

    let result = frame_loop.run_frame(|_| {
        Err(Error::CallbackFailed("swapchain out of date".to_string()))
    });

    match result {
        Err(Error::FrameFailed { frame, reason }) => {
            assert_eq!(frame, 1);
            assert!(reason.contains("swapchain out of date"));
        }
        other => panic!("expected FrameFailed, got {:?}", other),
    }

    let logged = entries
        .lock()
        .unwrap()
        .iter()
        .any(|e| e.severity == LogSeverity::Error && e.message.contains("render failed"));
    assert!(logged);

    log::reset_logger();
}

#[test]
#[serial]
fn test_trace_dispatch_logs_each_pass() {
    let entries = capture_logs();

    let dispatcher = Arc::new(BeforeRenderDispatcher::new());
    dispatcher.register(|| Ok(()), 0);
    let config = FrameLoopConfig {
        log_source: "test::TracedLoop".to_string(),
        trace_dispatch: true,
    };
    let mut frame_loop = FrameLoop::new(dispatcher, config).unwrap();
    frame_loop.run_frame(|_| Ok(())).unwrap();
    frame_loop.run_frame(|_| Ok(())).unwrap();

    let traces: Vec<String> = entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.source == "test::TracedLoop" && e.severity == LogSeverity::Trace)
        .map(|e| e.message.clone())
        .collect();
    assert_eq!(traces.len(), 2);
    assert!(traces[0].starts_with("Frame 0"));
    assert!(traces[1].contains("1 callbacks"));

    log::reset_logger();
}

#[test]
#[serial]
fn test_trace_dispatch_off_by_default() {
    let entries = capture_logs();

    let dispatcher = Arc::new(BeforeRenderDispatcher::new());
    let mut frame_loop = new_loop(&dispatcher);
    frame_loop.run_frame(|_| Ok(())).unwrap();

    let traced = entries
        .lock()
        .unwrap()
        .iter()
        .any(|e| e.source == "frame_hooks::FrameLoop" && e.severity == LogSeverity::Trace);
    assert!(!traced);

    log::reset_logger();
}
