mod support;

use sipd_bot::guard::{NavigationGuard, DEFAULT_RETRIES, RETRY_DELAY};
use sipd_bot::portal;
use sipd_bot::Error;
use sipd_browser::Target;
use support::{Call, FakeDriver};

#[tokio::test]
async fn test_ensure_visible_finds_element_first_try() {
    let driver = FakeDriver::new();
    let guard = NavigationGuard::new(&driver);
    let target = Target::css("h1.page-title");

    assert!(
        guard
            .ensure_visible(&target, DEFAULT_RETRIES, RETRY_DELAY)
            .await
    );
    assert_eq!(driver.count_of(|c| matches!(c, Call::Reload)), 0);
}

#[tokio::test(start_paused = true)]
async fn test_ensure_visible_reloads_between_attempts() {
    let driver = FakeDriver::new();
    let guard = NavigationGuard::new(&driver);
    let target = Target::css("h1.page-title");
    driver.mark_absent(&target);

    assert!(
        !guard
            .ensure_visible(&target, DEFAULT_RETRIES, RETRY_DELAY)
            .await
    );

    let key = target.to_string();
    assert_eq!(
        driver.count_of(|c| matches!(c, Call::WaitVisible(t) if *t == key)),
        3
    );
    // Reloads happen between attempts, never after the last one.
    assert_eq!(driver.count_of(|c| matches!(c, Call::Reload)), 2);
}

#[tokio::test]
async fn test_not_found_needs_all_three_indicators() {
    let driver = FakeDriver::new();
    let guard = NavigationGuard::new(&driver);

    driver.mark_attached(&portal::NOT_FOUND_HEADING);
    driver.mark_attached(&portal::NOT_FOUND_MESSAGE);
    assert!(!guard.is_not_found_page().await);

    driver.mark_attached(&portal::NOT_FOUND_HOME_LINK);
    assert!(guard.is_not_found_page().await);
}

#[tokio::test]
async fn test_goto_module_loads_clean_page() {
    let driver = FakeDriver::new();
    let guard = NavigationGuard::new(&driver);

    guard.goto_module("AKLAP", portal::AKLAP_URL).await.unwrap();

    assert_eq!(
        driver.count_of(|c| matches!(c, Call::Goto(url) if url.as_str() == portal::AKLAP_URL)),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn test_goto_module_fails_without_accounting_menu() {
    let driver = FakeDriver::new();
    let guard = NavigationGuard::new(&driver);
    driver.mark_absent(&portal::MENU_ACCOUNTING);

    let err = guard
        .goto_module("AKLAP", portal::AKLAP_URL)
        .await
        .unwrap_err();

    match err {
        Error::NavigationFailed { module, attempts } => {
            assert_eq!(module, "AKLAP");
            assert_eq!(attempts, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
    // An expired session never navigates anywhere.
    assert_eq!(driver.count_of(|c| matches!(c, Call::Goto(_))), 0);
}

#[tokio::test]
async fn test_goto_module_gives_up_after_bounded_attempts() {
    let driver = FakeDriver::new();
    let guard = NavigationGuard::new(&driver);
    driver.mark_attached(&portal::NOT_FOUND_HEADING);
    driver.mark_attached(&portal::NOT_FOUND_MESSAGE);
    driver.mark_attached(&portal::NOT_FOUND_HOME_LINK);

    let err = guard
        .goto_module("AKLAP", portal::AKLAP_URL)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NavigationFailed { attempts: 3, .. }));
    // Initial navigation plus three retries.
    assert_eq!(driver.count_of(|c| matches!(c, Call::Goto(_))), 4);
}

#[tokio::test]
async fn test_recover_reloads_once_when_page_is_healthy() {
    let driver = FakeDriver::new();
    let guard = NavigationGuard::new(&driver);

    assert!(guard.recover().await);
    assert_eq!(driver.count_of(|c| matches!(c, Call::Reload)), 1);
}

#[tokio::test(start_paused = true)]
async fn test_recover_gives_up_on_persistent_404() {
    let driver = FakeDriver::new();
    let guard = NavigationGuard::new(&driver);
    driver.mark_attached(&portal::NOT_FOUND_HEADING);
    driver.mark_attached(&portal::NOT_FOUND_MESSAGE);
    driver.mark_attached(&portal::NOT_FOUND_HOME_LINK);

    assert!(!guard.recover().await);
    assert_eq!(driver.count_of(|c| matches!(c, Call::Reload)), 4);
}
