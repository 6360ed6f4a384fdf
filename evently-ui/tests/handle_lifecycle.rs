//! Handle ownership across a display surface's life

mod common;

use common::harness;
use evently_ui::config::ApiConfig;
use evently_ui::resource::{request, LoadState, ResourceReference, ResourceSlot};
use futures::executor::block_on;
use std::cell::RefCell;

fn protected(filename: &str) -> ResourceReference {
    ResourceReference::secure_file(filename, &ApiConfig::default())
}

#[test]
fn test_replaced_handle_released_before_next_is_shown() {
    let h = harness(Some("tok"));
    let slot = RefCell::new(ResourceSlot::new(h.loader.object_urls()));
    let seen = RefCell::new(Vec::<LoadState>::new());
    let urls = h.urls.clone();

    block_on(request(&slot, &h.loader, Some(&protected("a.png")), |state| {
        seen.borrow_mut().push(state.clone())
    }));
    let a = slot.borrow().state().handle().unwrap().url().to_string();

    block_on(request(&slot, &h.loader, Some(&protected("b.png")), |state| {
        match state.handle() {
            Some(handle) => {
                assert_eq!(urls.revoked_count(&a), 1, "A still live when B was shown");
                assert_ne!(handle.url(), a);
            }
            None => assert_eq!(urls.revoked_count(&a), 0, "A revoked while still on screen"),
        }
        seen.borrow_mut().push(state.clone())
    }));
    let b = slot.borrow().state().handle().unwrap().url().to_string();
    assert!(h.urls.live.borrow().contains(&b));

    drop(slot);

    assert_eq!(h.urls.revoked_count(&a), 1);
    assert_eq!(h.urls.revoked_count(&b), 1);
    assert!(h.urls.live.borrow().is_empty());

    let seen = seen.borrow();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0], LoadState::Loading);
    assert_eq!(seen[2], LoadState::Loading);
}

#[test]
fn test_reopen_fetches_fresh_handle() {
    let h = harness(Some("tok"));
    let reference = protected("receipt.png");

    let first = RefCell::new(ResourceSlot::new(h.loader.object_urls()));
    block_on(request(&first, &h.loader, Some(&reference), |_| {}));
    let old = first.borrow().state().handle().unwrap().clone();
    first.borrow_mut().close();
    assert_eq!(first.borrow().state(), &LoadState::Idle);

    let second = RefCell::new(ResourceSlot::new(h.loader.object_urls()));
    block_on(request(&second, &h.loader, Some(&reference), |_| {}));
    let fresh = second.borrow().state().handle().unwrap().clone();

    assert_eq!(h.fetcher.calls(), 2);
    assert_ne!(old, fresh);
    assert_eq!(h.urls.revoked_count(old.url()), 1);
    assert!(h.urls.live.borrow().contains(fresh.url()));
}

#[test]
fn test_close_during_fetch_releases_late_handle() {
    let h = harness(Some("tok"));
    let slot = RefCell::new(ResourceSlot::new(h.loader.object_urls()));

    let ticket = slot.borrow_mut().begin().unwrap();
    let outcome = block_on(h.loader.load(Some(&protected("late.png"))));
    let late = outcome.handle().unwrap().url().to_string();

    slot.borrow_mut().close();
    assert!(!slot.borrow_mut().settle(ticket, outcome));

    assert_eq!(slot.borrow().state(), &LoadState::Idle);
    assert_eq!(h.urls.revoked_count(&late), 1);
    assert!(h.urls.live.borrow().is_empty());
}

#[test]
fn test_out_of_order_responses_keep_latest() {
    let h = harness(Some("tok"));
    let slot = RefCell::new(ResourceSlot::new(h.loader.object_urls()));

    let first_ticket = slot.borrow_mut().begin().unwrap();
    let second_ticket = slot.borrow_mut().begin().unwrap();
    let first = block_on(h.loader.load(Some(&protected("first.png"))));
    let second = block_on(h.loader.load(Some(&protected("second.png"))));
    let second_url = second.handle().unwrap().url().to_string();
    let first_url = first.handle().unwrap().url().to_string();

    assert!(slot.borrow_mut().settle(second_ticket, second));
    assert!(!slot.borrow_mut().settle(first_ticket, first));

    assert_eq!(slot.borrow().state().src(), Some(second_url.as_str()));
    assert_eq!(h.urls.revoked_count(&first_url), 1);
    assert_eq!(h.urls.revoked_count(&second_url), 0);
}

#[test]
fn test_absent_reference_leaves_slot_idle() {
    let h = harness(Some("tok"));
    let slot = RefCell::new(ResourceSlot::new(h.loader.object_urls()));
    let notified = RefCell::new(0);

    block_on(request(&slot, &h.loader, None, |state| {
        assert_eq!(state, &LoadState::Idle);
        *notified.borrow_mut() += 1
    }));

    assert_eq!(slot.borrow().state(), &LoadState::Idle);
    assert_eq!(*notified.borrow(), 1);
    assert_eq!(h.fetcher.calls(), 0);
}

#[test]
fn test_clearing_reference_releases_shown_handle() {
    let h = harness(Some("tok"));
    let slot = RefCell::new(ResourceSlot::new(h.loader.object_urls()));
    let urls = h.urls.clone();

    block_on(request(&slot, &h.loader, Some(&protected("a.png")), |_| {}));
    let a = slot.borrow().state().handle().unwrap().url().to_string();

    let seen = RefCell::new(Vec::<LoadState>::new());
    block_on(request(&slot, &h.loader, None, |state| {
        assert_eq!(urls.revoked_count(&a), 0);
        seen.borrow_mut().push(state.clone())
    }));

    assert_eq!(*seen.borrow(), vec![LoadState::Idle]);
    assert_eq!(slot.borrow().state(), &LoadState::Idle);
    assert_eq!(h.urls.revoked_count(&a), 1);
    assert!(h.urls.live.borrow().is_empty());
    assert_eq!(h.fetcher.calls(), 1);

    drop(slot);
    assert_eq!(h.urls.revoked_count(&a), 1);
}

#[test]
fn test_failed_load_leaves_nothing_to_release() {
    let h = harness(None);
    h.fetcher.respond_status(401);
    let slot = RefCell::new(ResourceSlot::new(h.loader.object_urls()));

    block_on(request(&slot, &h.loader, Some(&protected("a.png")), |_| {}));

    assert!(slot.borrow().state().is_placeholder());
    drop(slot);
    assert!(h.urls.revoked.borrow().is_empty());
}
