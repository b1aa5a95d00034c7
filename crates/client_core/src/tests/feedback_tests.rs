use super::*;
use crate::test_support::{shared_surface, RecordingSurface};
use crate::surface::OrderButtonState::{Confirmed, Ready};

#[tokio::test(start_paused = true)]
async fn confirmation_reverts_after_delay() {
    let surface = Arc::new(RecordingSurface::default());
    let mut timer = FeedbackTimer::new();

    timer.confirm(0, shared_surface(&surface));
    assert_eq!(surface.button(0), Some(Confirmed));
    assert!(Confirmed.is_disabled());
    assert_eq!(timer.pending(), 1);
    assert!(timer.is_confirming(0));
    assert!(!timer.is_confirming(1));

    tokio::time::sleep(Duration::from_millis(1_999)).await;
    assert_eq!(surface.button(0), Some(Confirmed));

    tokio::time::sleep(Duration::from_millis(2)).await;
    tokio::task::yield_now().await;
    assert_eq!(surface.button(0), Some(Ready));
    assert_eq!(surface.button_history(0), [Confirmed, Ready]);
    assert_eq!(timer.pending(), 0);
    assert!(!timer.is_confirming(0));
}

#[tokio::test(start_paused = true)]
async fn reconfirming_a_card_restarts_its_timer() {
    let surface = Arc::new(RecordingSurface::default());
    let mut timer = FeedbackTimer::new();

    timer.confirm(0, shared_surface(&surface));
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    timer.confirm(0, shared_surface(&surface));

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(surface.button(0), Some(Confirmed));

    tokio::time::sleep(Duration::from_millis(600)).await;
    tokio::task::yield_now().await;
    assert_eq!(surface.button_history(0), [Confirmed, Confirmed, Ready]);
}

#[tokio::test(start_paused = true)]
async fn cards_have_independent_timers() {
    let surface = Arc::new(RecordingSurface::default());
    let mut timer = FeedbackTimer::with_delay(Duration::from_millis(500));

    timer.confirm(0, shared_surface(&surface));
    timer.confirm(1, shared_surface(&surface));
    assert_eq!(timer.pending(), 2);

    assert!(timer.cancel(1));
    assert!(!timer.cancel(1));

    tokio::time::sleep(Duration::from_millis(600)).await;
    tokio::task::yield_now().await;
    assert_eq!(surface.button(0), Some(Ready));
    assert_eq!(surface.button_history(1), [Confirmed]);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_timer_cancels_pending_restores() {
    let surface = Arc::new(RecordingSurface::default());
    let mut timer = FeedbackTimer::new();
    timer.confirm(3, shared_surface(&surface));
    drop(timer);

    tokio::time::sleep(CONFIRMATION_DELAY * 2).await;
    tokio::task::yield_now().await;
    assert_eq!(surface.button_history(3), [Confirmed]);
}

#[test]
fn button_labels_follow_state() {
    assert_eq!(Ready.label(), crate::surface::ORDER_LABEL);
    assert_eq!(Confirmed.label(), crate::surface::ADDED_CONFIRMATION);
    assert!(!Ready.is_disabled());
}
