use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{Catalog, Dimension, PluginRecord};
use crate::query::{QueryStore, SortKey};

use super::codec::seed_from_query;
use super::scheduler::{ManualScheduler, Scheduler};
use super::synchronizer::{MemoryUrlSink, UrlSynchronizer};

const DEBOUNCE: Duration = Duration::from_millis(100);

struct Fixture {
    store: QueryStore,
    scheduler: Rc<RefCell<ManualScheduler>>,
    writes: Rc<RefCell<Vec<String>>>,
    synchronizer: UrlSynchronizer,
}

fn fixture() -> Fixture {
    let record = PluginRecord {
        name: "napari-video".into(),
        operating_systems: vec!["Operating System :: OS Independent".into()],
        plugin_types: vec!["reader".into()],
        ..PluginRecord::default()
    };
    let catalog = Arc::new(Catalog::new(vec![record]));
    let mut store = QueryStore::new(catalog, SortKey::ReleaseDate);

    let scheduler = Rc::new(RefCell::new(ManualScheduler::new()));
    let dyn_scheduler: Rc<RefCell<dyn Scheduler>> = scheduler.clone();
    let sink = MemoryUrlSink::new();
    let writes = sink.writes();
    let synchronizer = UrlSynchronizer::new(dyn_scheduler, Box::new(sink), DEBOUNCE);
    synchronizer.observe(&mut store);

    Fixture {
        store,
        scheduler,
        writes,
        synchronizer,
    }
}

fn advance(fixture: &Fixture, duration: Duration) {
    fixture.scheduler.borrow_mut().advance(duration);
}

#[test]
fn a_mutation_writes_once_after_the_debounce_window() {
    let mut fx = fixture();
    fx.store.set_search_text("video");
    assert!(fx.synchronizer.write_pending());
    assert!(fx.writes.borrow().is_empty());

    advance(&fx, DEBOUNCE);
    assert_eq!(*fx.writes.borrow(), vec!["search=video&sort=relevance"]);
    assert!(!fx.synchronizer.write_pending());
}

#[test]
fn mutations_within_one_window_coalesce_into_one_write() {
    let mut fx = fixture();
    for text in ["v", "vi", "vid", "vide", "video"] {
        fx.store.set_search_text(text);
        advance(&fx, Duration::from_millis(30));
    }
    assert!(fx.writes.borrow().is_empty(), "timer must reset per keystroke");

    advance(&fx, DEBOUNCE);
    let writes = fx.writes.borrow();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0], "search=video&sort=relevance");
}

#[test]
fn the_write_reflects_the_final_value_of_every_key() {
    let mut fx = fixture();
    fx.store.set_search_text("video");
    fx.store.toggle_facet(Dimension::OperatingSystem, "linux");
    fx.store.toggle_facet(Dimension::OperatingSystem, "linux");
    fx.store.toggle_facet(Dimension::PluginType, "reader");
    fx.store.set_page(2);

    advance(&fx, DEBOUNCE);
    let writes = fx.writes.borrow();
    assert_eq!(writes.len(), 1);
    assert_eq!(
        writes[0],
        "search=video&sort=relevance&page=2&pluginType=reader"
    );
}

#[test]
fn separate_windows_produce_separate_writes() {
    let mut fx = fixture();
    fx.store.set_search_text("video");
    advance(&fx, DEBOUNCE);
    fx.store.set_page(2);
    advance(&fx, DEBOUNCE);

    let writes = fx.writes.borrow();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0], "search=video&sort=relevance");
    assert_eq!(writes[1], "search=video&sort=relevance&page=2");
}

#[test]
fn reset_mid_debounce_discards_the_stale_payload() {
    let mut fx = fixture();
    fx.store.set_search_text("video");
    advance(&fx, Duration::from_millis(50));
    fx.store.reset();

    advance(&fx, DEBOUNCE);
    let writes = fx.writes.borrow();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0], "sort=releaseDate");
}

#[test]
fn written_urls_seed_back_to_the_same_state() {
    let mut fx = fixture();
    fx.store.set_search_text("video");
    fx.store.toggle_facet(Dimension::OperatingSystem, "mac");
    fx.store.set_page(3);
    advance(&fx, DEBOUNCE);

    let written = fx.writes.borrow().last().cloned().unwrap();
    let reread = seed_from_query(&written, fx.store.catalog(), SortKey::ReleaseDate);
    assert_eq!(reread, fx.store.snapshot());
}

#[test]
fn unsubscribed_synchronizer_schedules_nothing() {
    let mut fx = fixture();
    let id = fx.synchronizer.observe(&mut fx.store);
    fx.store.unsubscribe(id);
    // The original observe subscription from the fixture still fires; the
    // removed one must not double-write.
    fx.store.set_search_text("video");
    advance(&fx, DEBOUNCE);
    assert_eq!(fx.writes.borrow().len(), 1);
}
