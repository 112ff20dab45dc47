use chrono_tz::Tz;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use usage_charts::ticks::{Granularity, TickKind, TickRuleChain, TimeAxisTickGenerator};

const T0: f64 = 1_700_000_000.0; // 2023-11-14 22:13:20 UTC

fn generator() -> TimeAxisTickGenerator {
    TimeAxisTickGenerator::new(TickRuleChain::new(Tz::UTC), 100.0)
}

#[test]
fn test_one_hour_on_500px_selects_five_minutes() {
    let generator = generator();
    let index = generator.select_rule(T0, T0 + 3600.0, 500.0).unwrap();
    assert_eq!(generator.chain().rules()[index], Granularity::FiveMinutes);
}

#[test]
fn test_one_hour_ticks() {
    let ticks = generator().generate(T0, T0 + 3600.0, 500.0);

    let regular: Vec<&str> = ticks
        .iter()
        .filter(|t| t.kind == TickKind::Regular)
        .map(|t| t.label.as_str())
        .collect();
    assert_eq!(regular.len(), 12);
    assert_eq!(regular.first(), Some(&"22:15"));
    assert_eq!(regular.last(), Some(&"23:10"));
    assert!(regular.iter().all(|l| l.len() == 5 && l.as_bytes()[2] == b':'));

    let first = ticks.first().unwrap();
    let last = ticks.last().unwrap();
    assert_eq!(first.kind, TickKind::Boundary);
    assert_eq!(first.value, T0);
    assert_eq!(first.label, "14 Nov 2023 22:13");
    assert_eq!(last.kind, TickKind::Boundary);
    assert_eq!(last.value, T0 + 3600.0);
    assert_eq!(last.label, "14 Nov 2023 23:13");
}

#[test]
fn test_intermediate_ticks_fill_sparse_edges() {
    let chain = TickRuleChain::new(Tz::UTC);
    let hour = chain.rules().iter().position(|r| *r == Granularity::Hour).unwrap();
    // 00:10 to 02:50: regular hourly ticks at 01:00 and 02:00.
    let start = 1_700_006_400.0 + 600.0;
    let end = 1_700_006_400.0 + 2.0 * 3600.0 + 3000.0;
    let ticks = chain.fill_range(hour, start, end, true);

    let intermediate: Vec<f64> = ticks
        .iter()
        .filter(|t| t.kind == TickKind::Intermediate)
        .map(|t| t.value)
        .collect();
    assert!(!intermediate.is_empty());
    let first_regular = ticks.iter().find(|t| t.kind == TickKind::Regular).unwrap().value;
    let last_regular = ticks.iter().rev().find(|t| t.kind == TickKind::Regular).unwrap().value;
    // Only the edges are filled, never the space between regular ticks.
    assert!(intermediate
        .iter()
        .all(|v| *v < first_regular || *v > last_regular));
}

#[test]
fn test_fill_intermediate_uses_next_rule() {
    let chain = TickRuleChain::new(Tz::UTC);
    let hour = chain.rules().iter().position(|r| *r == Granularity::Hour).unwrap();
    let start = 1_700_006_400.0; // 2023-11-15 00:00:00 UTC
    let ticks = chain.fill_intermediate(hour, start, start + 1800.0);
    let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, (1..6).map(|i| start + i as f64 * 300.0).collect::<Vec<_>>());
    assert!(ticks.iter().all(|t| t.kind == TickKind::Intermediate));

    let last = chain.len() - 1;
    assert!(chain.fill_intermediate(last, start, start + 10.0).is_empty());
}

#[test]
fn test_ticks_are_monotonic_and_within_range() {
    let generator = generator();
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..300 {
        let start = rng.random_range(1_500_000_000.0..1_800_000_000.0_f64).floor();
        let span = 10f64.powf(rng.random_range(0.5..8.0_f64));
        let end = start + span;
        let size = rng.random_range(50.0..2000.0_f64);
        let ticks = generator.generate(start, end, size);

        assert!(ticks.len() >= 2, "{start}..{end} on {size}px gave {} ticks", ticks.len());
        for pair in ticks.windows(2) {
            assert!(pair[0].value < pair[1].value, "ticks not increasing for {start}..{end}");
        }
        assert!(ticks.iter().all(|t| t.value >= start && t.value <= end));
        assert_eq!(ticks.first().unwrap().kind, TickKind::Boundary);
        assert_eq!(ticks.last().unwrap().kind, TickKind::Boundary);
    }
}

#[test]
fn test_generation_is_deterministic() {
    let generator = generator();
    let a = generator.generate(T0, T0 + 86_400.0 * 3.0, 800.0);
    let b = generator.generate(T0, T0 + 86_400.0 * 3.0, 800.0);
    assert_eq!(a, b);
}

#[test]
fn test_degenerate_input_gives_no_ticks() {
    let generator = generator();
    assert!(generator.generate(T0, T0 + 3600.0, 0.0).is_empty());
    assert!(generator.generate(T0, T0 + 3600.0, f64::NAN).is_empty());
    assert!(generator.generate(T0, T0 + 3600.0, f64::INFINITY).is_empty());
    assert!(generator.generate(T0, T0, 500.0).is_empty());
    assert!(generator.generate(f64::NAN, T0, 500.0).is_empty());
}

#[test]
fn test_inverted_range_is_swapped() {
    let generator = generator();
    let forward = generator.generate(T0, T0 + 3600.0, 500.0);
    let backward = generator.generate(T0 + 3600.0, T0, 500.0);
    assert_eq!(forward, backward);
}

#[test]
fn test_day_labels_at_midnight() {
    let chain = TickRuleChain::new(Tz::UTC);
    let six_hours = chain
        .rules()
        .iter()
        .position(|r| *r == Granularity::SixHours)
        .unwrap();
    let midnight = 1_700_006_400.0;
    let ticks = chain.fill_range(six_hours, midnight - 3600.0, midnight + 13.0 * 3600.0, false);
    let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["15 Nov", "06:00", "12:00"]);
}

#[test]
fn test_calendar_ticks_follow_timezone() {
    let paris: Tz = "Europe/Paris".parse().unwrap();
    let chain = TickRuleChain::new(paris);
    let day = chain.rules().iter().position(|r| *r == Granularity::Day).unwrap();
    // Across the 2023-10-29 DST change in Paris.
    let start = 1_698_400_000.0;
    let ticks = chain.fill_range(day, start, start + 4.0 * 86_400.0, false);
    assert!(ticks.len() >= 3);
    for tick in &ticks {
        let local = chrono::DateTime::from_timestamp(tick.value as i64, 0)
            .unwrap()
            .with_timezone(&paris);
        assert_eq!(local.format("%H:%M").to_string(), "00:00");
    }
}
