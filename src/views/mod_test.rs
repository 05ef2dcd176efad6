use super::*;

#[test]
fn bar_is_fixed_width() {
    for percent in [0.0, 12.5, 50.0, 99.9, 100.0] {
        assert_eq!(bar(percent).chars().count(), BAR_WIDTH);
    }
}

#[test]
fn bar_fills_proportionally() {
    assert_eq!(bar(50.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
    assert_eq!(bar(0.0).chars().filter(|c| *c == '█').count(), 0);
}

#[test]
fn bar_clamps_out_of_range() {
    assert_eq!(bar(250.0), bar(100.0));
    assert_eq!(bar(-3.0), bar(0.0));
}

#[test]
fn money_has_two_decimals() {
    assert_eq!(money(49.0), "$49.00");
    assert_eq!(money(185.499), "$185.50");
}

#[test]
fn short_timestamp_drops_seconds_and_fraction() {
    assert_eq!(short_timestamp("2026-10-01T12:30:45.123456"), "2026-10-01 12:30");
    assert_eq!(short_timestamp("2026-10-01"), "2026-10-01");
}
