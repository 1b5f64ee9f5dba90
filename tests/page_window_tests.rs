//! Pager window properties and screen-level scenarios

use proptest::prelude::*;
use rstest::rstest;

use storefront_admin::domain::{
    ListError, PageLabel::{self, Ellipsis, Page}, PageWindow, PageWindowCalculator, total_pages,
};

#[rstest]
#[case::middle_of_twenty(10, 20, vec![Page(1), Ellipsis, Page(8), Page(9), Page(10), Page(11), Page(12), Ellipsis, Page(20)])]
#[case::four_pages_fit(1, 4, vec![Page(1), Page(2), Page(3), Page(4)])]
#[case::near_the_start(2, 20, vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(20)])]
#[case::near_the_end(19, 20, vec![Page(1), Ellipsis, Page(17), Page(18), Page(19), Page(20)])]
#[case::two_pages(2, 2, vec![Page(1), Page(2)])]
fn labels_with_default_radius(
    #[case] current: u32,
    #[case] pages: u32,
    #[case] expected: Vec<PageLabel>,
) {
    let window = PageWindowCalculator::default()
        .compute(current, pages, pages as usize * 10, 10)
        .unwrap();
    assert_eq!(window.labels, expected);
}

#[test]
fn ellipsis_is_never_interactive() {
    let window = PageWindowCalculator::default().compute(50, 100, 1000, 10).unwrap();
    let interactive: Vec<_> = window.labels.iter().filter(|l| l.is_interactive()).collect();
    assert_eq!(interactive.len(), window.labels.len() - 2);
    assert_eq!(window.pages().collect::<Vec<_>>(), vec![1, 48, 49, 50, 51, 52, 100]);
}

#[test]
fn caption_for_a_partial_last_page() {
    let window = PageWindow::for_listing(3, 25, 10, 2).unwrap();
    assert_eq!((window.start_item, window.end_item), (21, 25));
}

#[test]
fn current_page_is_never_clamped() {
    let calc = PageWindowCalculator::default();
    let err = calc.compute(21, 20, 200, 10).unwrap_err();
    assert!(matches!(err, ListError::InvalidPagingState { .. }));
    assert!(err.is_recoverable());
}

proptest! {
    #[test]
    fn window_stays_bounded(
        total in 0u32..=100_000,
        current_seed in any::<u32>(),
        radius in 0u32..=10,
    ) {
        let current = current_seed % total.max(1) + 1;
        let calc = PageWindowCalculator::new(radius);
        let window = calc.compute(current, total, total as usize * 10, 10).unwrap();

        prop_assert!(window.labels.len() <= calc.max_labels());
        prop_assert!(window.labels.len() <= 2 * radius as usize + 5);
        if total >= 1 {
            prop_assert_eq!(window.labels.first(), Some(&Page(1)));
            prop_assert_eq!(window.labels.last(), Some(&Page(total)));
            prop_assert!(window.pages().any(|p| p == current));
        }

        let pages: Vec<u32> = window.pages().collect();
        prop_assert!(pages.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(window.labels.windows(2).all(|w| !(w[0] == Ellipsis && w[1] == Ellipsis)));
    }

    #[test]
    fn caption_fits_the_page(
        total_items in 0usize..5_000,
        page_size in prop::sample::select(vec![1u32, 10, 20, 50, 100]),
        current_seed in any::<u32>(),
    ) {
        let pages = total_pages(total_items, page_size);
        let current = current_seed % pages.max(1) + 1;
        let window = PageWindowCalculator::default()
            .compute(current, pages, total_items, page_size)
            .unwrap();

        prop_assert!(window.end_item <= total_items);
        if total_items == 0 {
            prop_assert_eq!((window.start_item, window.end_item), (0, 0));
        } else {
            prop_assert!(window.start_item >= 1);
            prop_assert!(window.end_item >= window.start_item);
            prop_assert!(window.end_item - window.start_item < page_size as usize);
        }
    }
}
