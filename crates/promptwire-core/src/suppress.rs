use std::cell::Cell;
use std::future::Future;

tokio::task_local! {
    static TASK_SUPPRESSED: bool;
}

thread_local! {
    static THREAD_SUPPRESSED: Cell<bool> = const { Cell::new(false) };
}

/// Run a future with instrumentation suppressed for its whole lifetime
///
/// Anything that emits telemetry checks [`is_suppressed`] first, so an
/// instrumented storage client used from inside this scope cannot feed
/// events back into the emitter that triggered it.
pub async fn suppressed<F: Future>(fut: F) -> F::Output {
    TASK_SUPPRESSED.scope(true, fut).await
}

/// Run a closure with instrumentation suppressed on the current thread
pub fn suppressed_sync<R>(f: impl FnOnce() -> R) -> R {
    let previous = THREAD_SUPPRESSED.with(|flag| flag.replace(true));
    let _restore = Restore(previous);
    f()
}

/// Whether the current task or thread is inside a suppression scope
pub fn is_suppressed() -> bool {
    TASK_SUPPRESSED.try_with(|flag| *flag).unwrap_or(false) || THREAD_SUPPRESSED.with(Cell::get)
}

struct Restore(bool);

impl Drop for Restore {
    fn drop(&mut self) {
        THREAD_SUPPRESSED.with(|flag| flag.set(self.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn task_scope_only_covers_the_wrapped_future() {
        assert!(!is_suppressed());

        let inside = suppressed(async { is_suppressed() }).await;
        assert!(inside);

        assert!(!is_suppressed());
    }

    #[test]
    fn thread_scope_restores_previous_state() {
        let nested = suppressed_sync(|| {
            let inner = suppressed_sync(is_suppressed);
            (inner, is_suppressed())
        });

        assert_eq!(nested, (true, true));
        assert!(!is_suppressed());
    }

    #[test]
    fn thread_scope_restores_after_panic() {
        let result = std::panic::catch_unwind(|| suppressed_sync::<()>(|| panic!("boom")));
        assert!(result.is_err());
        assert!(!is_suppressed());
    }
}
