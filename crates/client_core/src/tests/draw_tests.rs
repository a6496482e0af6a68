use super::*;
use crate::test_support::ScriptedRandom;

fn abc() -> PromptCatalog {
    PromptCatalog::new(["A", "B", "C"]).expect("catalog")
}

#[test]
fn first_draw_without_marker_accepts_any_pick() {
    let mut random = ScriptedRandom::new([0, 0, 1]);
    let draw = draw_prompt(&abc(), None, &mut random);
    assert_eq!(draw.prompt, "A");
    assert_eq!(draw.attempts, 1);
}

#[test]
fn rejects_the_last_shown_prompt_until_a_new_one_comes_up() {
    let last = Prompt::from("A");
    let mut random = ScriptedRandom::new([0, 0, 1]);
    let draw = draw_prompt(&abc(), Some(&last), &mut random);
    assert_eq!(draw.prompt, "B");
    assert_eq!(draw.attempts, 3);
    assert_eq!(random.calls, 3);
}

#[test]
fn single_entry_catalog_waives_the_repeat_rule() {
    let catalog = PromptCatalog::new(["only"]).expect("catalog");
    let last = Prompt::from("only");
    let mut random = ScriptedRandom::new([0]);
    let draw = draw_prompt(&catalog, Some(&last), &mut random);
    assert_eq!(draw.prompt, "only");
    assert_eq!(draw.attempts, 1);
}

#[test]
fn consecutive_draws_never_repeat() {
    for catalog in [
        PromptCatalog::new(["x", "y"]).expect("pair"),
        abc(),
        PromptCatalog::builtin(),
    ] {
        let mut random = SeededRandom::new(7);
        let mut last: Option<Prompt> = None;
        for _ in 0..1000 {
            let draw = draw_prompt(&catalog, last.as_ref(), &mut random);
            assert_ne!(Some(&draw.prompt), last.as_ref());
            last = Some(draw.prompt);
        }
    }
}

#[test]
fn seeded_random_is_reproducible() {
    let catalog = PromptCatalog::builtin();
    let mut first = SeededRandom::new(42);
    let mut second = SeededRandom::new(42);
    for _ in 0..20 {
        assert_eq!(
            draw_prompt(&catalog, None, &mut first),
            draw_prompt(&catalog, None, &mut second)
        );
    }
}

#[test]
fn thread_random_stays_in_bounds() {
    let mut random = ThreadRandom;
    for upper in 1..50 {
        assert!(random.next_index(upper) < upper);
    }
}

#[test]
fn catalog_of_one_repeated_prompt_settles_immediately() {
    let catalog = PromptCatalog::new(["same", "same"]).expect("catalog");
    let last = Prompt::from("same");
    let mut random = SeededRandom::new(1);
    for _ in 0..100 {
        let draw = draw_prompt(&catalog, Some(&last), &mut random);
        assert_eq!(draw.prompt, "same");
        assert_eq!(draw.attempts, 1);
    }
}

#[test]
fn duplicate_entries_still_avoid_the_last_shown_prompt() {
    let catalog = PromptCatalog::new(["A", "A", "B"]).expect("catalog");
    let last = Prompt::from("A");
    let mut random = ScriptedRandom::new([0, 1, 2]);
    let draw = draw_prompt(&catalog, Some(&last), &mut random);
    assert_eq!(draw.prompt, "B");
    assert_eq!(draw.attempts, 3);
}
