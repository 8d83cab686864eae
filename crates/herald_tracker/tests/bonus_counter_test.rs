use herald_core::{ArcLedger, FeedEntry, FeedEntryBuilder};
use herald_tracker::{
    BonusObservation, BonusRelease, BonusTotals, BonusWording, plan_bonus,
};

fn chapter(name: &str) -> FeedEntry {
    FeedEntryBuilder::default()
        .chapter_name(name)
        .build()
        .unwrap()
}

#[test]
fn test_partial_extras_release_advances_once() {
    let paid = vec![
        chapter("Chapter 1184"),
        chapter("Extra 1"),
        chapter("Extra 2"),
        chapter("Extra 3"),
    ];
    let totals = BonusTotals::parse("1184 chapters + 8 extras");
    let mut ledger = ArcLedger::default();

    let observed = BonusObservation::observe(&paid);
    let plan = plan_bonus(ledger.bonus_counter, &observed, &totals).unwrap();
    assert_eq!(plan.watermark, 3);
    assert_eq!(plan.wording, BonusWording::Extras(BonusRelease::Partial));
    assert_eq!(plan.wording.dropped_phrase(), "New extras just dropped");
    assert_eq!(plan.headline, "EXTRAS");

    ledger.bonus_counter = plan.watermark;
    assert_eq!(plan_bonus(ledger.bonus_counter, &observed, &totals), None);
}

#[test]
fn test_first_side_story() {
    let paid = vec![chapter("Side Story 1: Summer")];
    let totals = BonusTotals::parse("300 chapters + 3 side stories");

    let plan = plan_bonus(0, &BonusObservation::observe(&paid), &totals).unwrap();
    assert_eq!(
        plan.wording.dropped_phrase(),
        "The first of those side stories just dropped"
    );
    assert_eq!(plan.headline, "SIDE STORIES");
}

#[test]
fn test_everything_released() {
    let free = vec![chapter("Extra 2")];
    let paid = vec![
        FeedEntryBuilder::default()
            .name_extend("Side Story 1")
            .build()
            .unwrap(),
    ];
    let totals = BonusTotals::parse("90 chapters + 2 extras + 1 side story");

    let observed = BonusObservation::observe(free.iter().chain(paid.iter()));
    assert_eq!(observed.extras, 2);
    assert_eq!(observed.side_stories, 1);

    let plan = plan_bonus(0, &observed, &totals).unwrap();
    assert_eq!(plan.wording, BonusWording::Both { all_released: true });
    assert_eq!(plan.headline, "EXTRAS + SIDE STORY");
    assert_eq!(plan.watermark, 2);
}

#[test]
fn test_counter_never_decreases() {
    let paid = vec![chapter("Extra 2")];
    let totals = BonusTotals::default();
    assert_eq!(plan_bonus(5, &BonusObservation::observe(&paid), &totals), None);
}
