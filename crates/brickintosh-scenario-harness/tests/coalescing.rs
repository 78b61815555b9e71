use brickintosh_scenario_harness::ScenarioHarness;
use speccy_fb::color::{BLUE, WHITE};
use speccy_fb::{AddrWindow, Builder, Dimensions};

#[test]
fn single_plot_sends_one_row_window() {
    let mut harness = ScenarioHarness::new();
    harness.frame(false, |_| {});
    harness.take_transfers();

    let stats = harness.frame(false, |fb| fb.plot(5, 0, WHITE));
    assert_eq!((stats.runs, stats.rows, stats.pixels), (1, 1, 192));

    let transfers = harness.take_transfers();
    assert_eq!(transfers.len(), 1);
    assert_eq!(
        transfers[0].window,
        AddrWindow {
            x: 24,
            y: 12 + 5,
            width: 192,
            height: 1
        }
    );
    assert_eq!(harness.shown(5, 0), Some(WHITE));
}

#[test]
fn disjoint_columns_become_separate_windows() {
    let mut harness = ScenarioHarness::new();
    harness.frame(false, |_| {});
    harness.take_transfers();

    harness.frame(false, |fb| {
        fb.vline(3, 0, 10, WHITE);
        fb.vline(4, 20, 10, WHITE);
        fb.vline(9, 50, 1, WHITE);
        fb.hline(200, 100, 5, BLUE);
    });

    let windows: Vec<(u16, u16)> = harness
        .take_transfers()
        .iter()
        .map(|t| (t.window.y - 12, t.window.height))
        .collect();
    assert_eq!(windows, vec![(3, 2), (9, 1), (200, 5)]);
    assert_eq!(harness.last_stats().rows, 8);
}

#[test]
fn small_surface_on_small_panel() {
    let config = Builder::new()
        .dimensions(Dimensions::new(16, 8).unwrap())
        .background(BLUE)
        .build();
    let mut harness = ScenarioHarness::with_config(config, (8, 16), (0, 0));
    // clear-after includes the rows left dirty by init, so the whole panel goes out
    let stats = harness.frame(true, |fb| fb.plot(15, 7, WHITE));
    assert_eq!(stats.rows, 16);

    assert_eq!(harness.panel_pixel_count(BLUE), 8 * 16 - 1);
    assert_eq!(harness.shown(15, 7), Some(WHITE));
    assert_eq!(harness.panel().pixel(0, 15), Some(WHITE));
    assert_eq!(harness.shown(16, 0), None);
}
