use std::sync::{Arc, OnceLock};

use tracing::info;

use crate::error::{Error, Result};
use crate::model::SearchIndex;

/// The process-wide table, set at most once.
static INSTALLED: OnceLock<SearchIndex> = OnceLock::new();

/// Receives a finished table, the role `initSearch` plays for the browser.
pub trait SearchConsumer {
    fn init_search(&mut self, index: Arc<SearchIndex>);
}

/// Hand a built table to its consumer.
///
/// Taking the index by value means a table is handed off exactly once; the
/// returned `Arc` is a read-only view shared with the consumer.
pub fn hand_off<C>(index: SearchIndex, consumer: &mut C) -> Arc<SearchIndex>
where
    C: SearchConsumer + ?Sized,
{
    let shared = Arc::new(index);
    consumer.init_search(Arc::clone(&shared));
    shared
}

/// Register `index` as the process-wide table.
///
/// Fails with [`Error::AlreadyInstalled`] on every call after the first.
pub fn install(index: SearchIndex) -> Result<&'static SearchIndex> {
    let mut installed_now = false;
    let slot = INSTALLED.get_or_init(|| {
        installed_now = true;
        index
    });
    if !installed_now {
        return Err(Error::AlreadyInstalled);
    }
    info!(
        crates = slot.len(),
        items = slot.item_count(),
        "installed search index"
    );
    Ok(slot)
}

pub fn installed() -> Option<&'static SearchIndex> {
    INSTALLED.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CRATE, fixture};

    #[derive(Default)]
    struct Recorder {
        calls: usize,
        seen: Option<Arc<SearchIndex>>,
    }

    impl SearchConsumer for Recorder {
        fn init_search(&mut self, index: Arc<SearchIndex>) {
            self.calls += 1;
            self.seen = Some(index);
        }
    }

    #[test]
    fn hand_off_calls_consumer_once() {
        let mut recorder = Recorder::default();
        let shared = hand_off(fixture(), &mut recorder);
        assert_eq!(recorder.calls, 1);
        let seen = recorder.seen.unwrap();
        assert!(Arc::ptr_eq(&seen, &shared));
        assert!(seen.get(CRATE).is_some());
    }

    // The only test touching the global slot.
    #[test]
    fn install_happens_once() {
        let first = install(fixture()).unwrap();
        assert_eq!(first.len(), 1);
        assert!(std::ptr::eq(installed().unwrap(), first));

        let err = install(SearchIndex::default()).unwrap_err();
        assert!(matches!(err, Error::AlreadyInstalled));
        assert_eq!(installed().unwrap().len(), 1);
    }
}
