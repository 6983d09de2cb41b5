use crate::press_timer::PressTimer;

use std::time::Duration;

use tokio::time;

/// WHAT: Holding for 500ms accumulates roughly half a second
/// WHY: Elapsed must track wall time on the fixed 100ms cadence
#[tokio::test(start_paused = true)]
async fn given_running_timer_when_500ms_pass_then_elapsed_about_half_second() {
    // Given: A started timer
    let mut timer = PressTimer::new();
    timer.start();

    // When: Half a second passes
    time::sleep(Duration::from_millis(500)).await;
    timer.stop();

    // Then: Elapsed is 0.5s within one tick of tolerance
    let elapsed = timer.elapsed();
    assert!(
        elapsed >= Duration::from_millis(400) && elapsed <= Duration::from_millis(500),
        "Expected ~500ms, got {:?}",
        elapsed
    );
}

/// WHAT: Starting twice without a stop yields a single run's accumulation
/// WHY: The prior tick source must be cancelled, never doubled
#[tokio::test(start_paused = true)]
async fn given_double_start_when_ticking_then_no_duplicate_accumulation() {
    // Given: A timer started, run for 200ms, then started again
    let mut timer = PressTimer::new();
    timer.start();
    time::sleep(Duration::from_millis(200)).await;
    timer.start();

    // When: Another 300ms passes
    time::sleep(Duration::from_millis(300)).await;
    timer.stop();

    // Then: Elapsed reflects only the second run at single cadence
    let elapsed = timer.elapsed();
    assert!(
        elapsed >= Duration::from_millis(200) && elapsed <= Duration::from_millis(300),
        "Expected ~300ms from the second run only, got {:?}",
        elapsed
    );
}

/// WHAT: A second start resets elapsed to zero
/// WHY: Press duration belongs to one press, not the sum of presses
#[tokio::test(start_paused = true)]
async fn given_elapsed_time_when_restarting_then_elapsed_resets() {
    // Given: A timer with accumulated time
    let mut timer = PressTimer::new();
    timer.start();
    time::sleep(Duration::from_millis(300)).await;
    assert!(timer.elapsed() >= Duration::from_millis(200));

    // When: Starting again
    timer.start();

    // Then: Elapsed is back at zero before the first new tick
    assert_eq!(timer.elapsed(), Duration::ZERO);
}

/// WHAT: Stop freezes the last elapsed value
/// WHY: The final press duration stays readable until the next start
#[tokio::test(start_paused = true)]
async fn given_stopped_timer_when_time_passes_then_elapsed_frozen() {
    // Given: A timer stopped after 300ms
    let mut timer = PressTimer::new();
    timer.start();
    time::sleep(Duration::from_millis(300)).await;
    timer.stop();
    let frozen = timer.elapsed();
    assert!(frozen >= Duration::from_millis(200));

    // When: More time passes after the stop
    time::sleep(Duration::from_millis(500)).await;

    // Then: Elapsed has not moved
    assert_eq!(timer.elapsed(), frozen);
}

/// WHAT: Observers are notified as elapsed changes
/// WHY: The value is observable state, not poll-only
#[tokio::test(start_paused = true)]
async fn given_subscriber_when_timer_ticks_then_change_notified() {
    // Given: A subscriber on a started timer
    let mut timer = PressTimer::new();
    let mut elapsed_rx = timer.subscribe();
    timer.start();

    // When: More than one tick elapses
    time::sleep(Duration::from_millis(150)).await;

    // Then: The subscriber observed a change
    assert!(elapsed_rx.has_changed().unwrap());
    assert!(*elapsed_rx.borrow_and_update() >= Duration::from_millis(100));
}
