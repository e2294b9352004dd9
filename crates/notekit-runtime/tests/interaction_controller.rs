use anyhow::Result;
use notekit_runtime::interaction::{Rejection, ToggleOutcome};
use notekit_runtime::navigation::Route;
use notekit_runtime::notify::NoticeKind;
use notekit_runtime::state::Waterfall;
use notekit_runtime::transport::TransportError;
use notekit_testing::assertions::{assert_call_count, assert_events, assert_notices};
use notekit_testing::{TestWorld, drain, fixtures};
use notekit_types::{InteractionKind, InteractionState, NoteCard, SubjectId};
use serde_json::json;
use std::time::Duration;

const LIKE: &str = "/likesAndCollect/like";
const COLLECT: &str = "/likesAndCollect/collect";

fn counted(active: bool, count: u64) -> InteractionState {
    InteractionState::counted(active, count)
}

#[tokio::test]
async fn test_applied_before_confirmation() -> Result<()> {
    let world = TestWorld::signed_in();
    let controller = world.controller();
    let mut events = controller.subscribe();
    let mut card = fixtures::note_card("n1", false, 3);

    world.transport.hold();
    let observe = async {
        world.transport.wait_for_calls(1).await;
        let applied = events.recv().await.unwrap();
        world.transport.release();
        applied
    };
    let (outcome, applied) = tokio::join!(
        controller.toggle(&mut card, InteractionKind::Like),
        observe
    );

    assert_eq!(applied.current().state, counted(true, 4));
    assert_eq!(applied.previous().state, counted(false, 3));
    assert_eq!(outcome, ToggleOutcome::Confirmed(counted(true, 4)));
    assert!(card.is_liked);
    assert_eq!(card.like_count, 4);
    assert_notices(&world.notifier, &["Liked"])?;
    assert_eq!(world.notifier.last().map(|(_, kind)| kind), Some(NoticeKind::Success));

    let calls = world.transport.calls_to(LIKE);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].payload, json!({"noteId": "n1"}));
    Ok(())
}

#[tokio::test]
async fn test_failure_restores_prior_state() -> Result<()> {
    let world = TestWorld::signed_in();
    world.transport.respond(LIKE, fixtures::failure("already liked"));
    let controller = world.controller();
    let mut events = controller.subscribe();
    let mut card = fixtures::note_card("n1", false, 3);

    let outcome = controller.toggle(&mut card, InteractionKind::Like).await;

    assert_eq!(
        outcome,
        ToggleOutcome::RolledBack {
            restored: counted(false, 3),
            message: "already liked".to_string(),
        }
    );
    assert!(!card.is_liked);
    assert_eq!(card.like_count, 3);
    assert_events(
        &drain(&mut events),
        &[(false, counted(true, 4)), (true, counted(false, 3))],
    )?;
    assert_notices(&world.notifier, &["already liked"])?;
    Ok(())
}

#[tokio::test]
async fn test_transport_error_uses_generic_message() -> Result<()> {
    let world = TestWorld::signed_in();
    world
        .transport
        .fail(LIKE, TransportError::Network("connection refused".to_string()));
    let controller = world.controller();
    let mut card = fixtures::note_card("n1", true, 1);

    let outcome = controller.toggle(&mut card, InteractionKind::Like).await;

    assert!(matches!(outcome, ToggleOutcome::RolledBack { .. }));
    assert!(card.is_liked);
    assert_eq!(card.like_count, 1);
    assert_notices(&world.notifier, &["Network request failed"])?;
    Ok(())
}

#[tokio::test]
async fn test_two_successful_toggles_are_symmetric() -> Result<()> {
    let world = TestWorld::signed_in();
    let controller = world.controller();

    for start in [0u64, 1, 5] {
        let mut card = fixtures::note_card("n1", false, start);
        controller.toggle(&mut card, InteractionKind::Like).await;
        controller.toggle(&mut card, InteractionKind::Like).await;
        assert!(!card.is_liked);
        assert_eq!(card.like_count, start);
    }
    Ok(())
}

#[tokio::test]
async fn test_rollback_is_independent_of_other_subjects() -> Result<()> {
    let world = TestWorld::signed_in();
    world.transport.respond(LIKE, fixtures::failure("nope"));
    world.transport.respond(COLLECT, fixtures::ok());
    let controller = world.controller();
    let mut failing = fixtures::note_card("n1", false, 3);
    let mut succeeding = fixtures::collected_card("n2", false, 7);

    let (first, second) = tokio::join!(
        controller.toggle(&mut failing, InteractionKind::Like),
        controller.toggle(&mut succeeding, InteractionKind::Collect),
    );

    assert!(matches!(first, ToggleOutcome::RolledBack { .. }));
    assert_eq!(second, ToggleOutcome::Confirmed(counted(true, 8)));
    assert_eq!((failing.is_liked, failing.like_count), (false, 3));
    assert_eq!((succeeding.is_collected, succeeding.collect_count), (true, 8));
    Ok(())
}

#[tokio::test]
async fn test_pending_toggle_suppresses_reentry() -> Result<()> {
    let world = TestWorld::signed_in();
    let controller = world.controller();
    let second_controller = controller.clone();
    let mut events = controller.subscribe();
    let mut first = fixtures::note_card("n1", false, 3);
    let mut second = first.clone();

    world.transport.hold();
    let reenter = async {
        world.transport.wait_for_calls(1).await;
        assert!(second_controller.is_busy(&SubjectId::new("n1"), InteractionKind::Like));
        let outcome = second_controller
            .toggle(&mut second, InteractionKind::Like)
            .await;
        world.transport.release();
        outcome
    };
    let (first_outcome, second_outcome) =
        tokio::join!(controller.toggle(&mut first, InteractionKind::Like), reenter);

    assert!(first_outcome.is_confirmed());
    assert_eq!(second_outcome, ToggleOutcome::Suppressed);
    assert_eq!((second.is_liked, second.like_count), (false, 3));
    assert_call_count(&world.transport, 1)?;
    assert_eq!(drain(&mut events).len(), 1);
    assert_notices(&world.notifier, &["Liked"])?;

    assert!(!controller.is_busy(&SubjectId::new("n1"), InteractionKind::Like));
    Ok(())
}

#[tokio::test]
async fn test_other_kind_on_same_subject_is_not_blocked() -> Result<()> {
    let world = TestWorld::signed_in();
    let controller = world.controller();
    let mut liked = fixtures::note_card("n1", false, 0);
    let mut collected = liked.clone();

    world.transport.hold();
    let collect = async {
        world.transport.wait_for_calls(1).await;
        let pending = controller.toggle(&mut collected, InteractionKind::Collect);
        let release = async {
            world.transport.wait_for_calls(2).await;
            world.transport.release();
        };
        tokio::join!(pending, release).0
    };
    let (like_outcome, collect_outcome) =
        tokio::join!(controller.toggle(&mut liked, InteractionKind::Like), collect);

    assert!(like_outcome.is_confirmed());
    assert!(collect_outcome.is_confirmed());
    assert_call_count(&world.transport, 2)?;
    Ok(())
}

#[tokio::test]
async fn test_broadcast_keeps_observers_consistent() -> Result<()> {
    let world = TestWorld::signed_in();
    world.transport.respond(LIKE, fixtures::ok());
    world.transport.respond(LIKE, fixtures::failure("later failure"));
    let controller = world.controller();

    let mut home = Waterfall::new();
    home.reset(vec![
        fixtures::note_card("n0", false, 0),
        fixtures::note_card("n1", false, 3),
    ]);
    let mut search_hits: Vec<NoteCard> = vec![fixtures::note_card("n1", false, 3)];
    let mut home_feed = controller.watch();
    let mut search_feed = controller.watch();

    let mut detail = fixtures::note_card("n1", false, 3);
    controller.toggle(&mut detail, InteractionKind::Like).await;
    home_feed.drain_into(&mut home);
    search_feed.drain_into(&mut search_hits);

    assert_eq!((home.items[1].is_liked, home.items[1].like_count), (true, 4));
    assert_eq!((home.right[0].is_liked, home.right[0].like_count), (true, 4));
    assert_eq!((search_hits[0].is_liked, search_hits[0].like_count), (true, 4));
    assert!(!home.items[0].is_liked);

    controller.toggle(&mut detail, InteractionKind::Like).await;
    home_feed.drain_into(&mut home);
    search_feed.drain_into(&mut search_hits);

    assert_eq!((detail.is_liked, detail.like_count), (true, 4));
    assert_eq!((home.items[1].is_liked, home.items[1].like_count), (true, 4));
    assert_eq!((search_hits[0].is_liked, search_hits[0].like_count), (true, 4));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_signed_out_short_circuits() -> Result<()> {
    let world = TestWorld::new();
    let controller = world.controller();
    let mut events = controller.subscribe();
    let mut card = fixtures::note_card("n1", false, 3);

    let outcome = controller.toggle(&mut card, InteractionKind::Like).await;

    assert_eq!(outcome, ToggleOutcome::Rejected(Rejection::SignInRequired));
    assert_eq!((card.is_liked, card.like_count), (false, 3));
    assert_call_count(&world.transport, 0)?;
    assert_notices(&world.notifier, &["Please sign in"])?;
    assert!(drain(&mut events).is_empty());

    assert!(world.navigator.routes().is_empty());
    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert_eq!(world.navigator.routes(), vec![Route::SignIn]);
    Ok(())
}

#[tokio::test]
async fn test_invalid_subject_is_rejected() -> Result<()> {
    let world = TestWorld::signed_in();
    let controller = world.controller();

    let mut anonymous = fixtures::note_card("", false, 0);
    let outcome = controller.toggle(&mut anonymous, InteractionKind::Like).await;
    assert_eq!(outcome, ToggleOutcome::Rejected(Rejection::InvalidSubject));

    let mut card = fixtures::note_card("n1", false, 0);
    let outcome = controller.toggle(&mut card, InteractionKind::Follow).await;
    assert_eq!(outcome, ToggleOutcome::Rejected(Rejection::InvalidSubject));

    assert_call_count(&world.transport, 0)?;
    assert_notices(&world.notifier, &["Invalid subject", "Invalid subject"])?;
    Ok(())
}

#[tokio::test]
async fn test_toggle_off_at_zero_stays_at_zero() -> Result<()> {
    let world = TestWorld::signed_in();
    let controller = world.controller();
    let mut events = controller.subscribe();
    let mut card = fixtures::note_card("n1", true, 0);

    let outcome = controller.toggle(&mut card, InteractionKind::Like).await;

    assert_eq!(outcome, ToggleOutcome::Confirmed(counted(false, 0)));
    assert_eq!((card.is_liked, card.like_count), (false, 0));
    assert_events(&drain(&mut events), &[(false, counted(false, 0))])?;
    assert_notices(&world.notifier, &["Like removed"])?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_timeout_rolls_back_and_clears_guard() -> Result<()> {
    let world = TestWorld::signed_in().with_config(|config| config.confirm_timeout_secs = 2);
    world.transport.hang(LIKE);
    let controller = world.controller();
    let mut events = controller.subscribe();
    let mut card = fixtures::note_card("n1", false, 3);

    let outcome = controller.toggle(&mut card, InteractionKind::Like).await;

    assert_eq!(
        outcome,
        ToggleOutcome::RolledBack {
            restored: counted(false, 3),
            message: "Request timed out".to_string(),
        }
    );
    assert_eq!((card.is_liked, card.like_count), (false, 3));
    assert_eq!(drain(&mut events).len(), 2);
    assert!(!controller.is_busy(&SubjectId::new("n1"), InteractionKind::Like));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_toggle_reverts_observers_and_releases_guard() -> Result<()> {
    let world = TestWorld::signed_in();
    world.transport.hold();
    let controller = world.controller();
    let mut events = controller.subscribe();
    let mut card = fixtures::note_card("n1", false, 3);
    let mut feed = vec![card.clone()];
    let mut watcher = controller.watch();

    let cancelled = tokio::time::timeout(
        Duration::from_millis(10),
        controller.toggle(&mut card, InteractionKind::Like),
    )
    .await;

    assert!(cancelled.is_err());
    assert!(!controller.is_busy(&SubjectId::new("n1"), InteractionKind::Like));

    let seen = drain(&mut events);
    assert_eq!(seen.len(), 2);
    assert!(!seen[0].is_revert());
    assert!(seen[1].is_revert());
    assert_eq!(seen[1].current().state, counted(false, 3));
    assert_eq!(seen[1].previous().state, counted(true, 4));

    assert_eq!(watcher.drain_into(&mut feed), 2);
    assert_eq!((feed[0].is_liked, feed[0].like_count), (false, 3));
    assert!(world.notifier.messages().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_follow_targets_author() -> Result<()> {
    let world = TestWorld::signed_in();
    let controller = world.controller();
    let mut detail = fixtures::note_detail("n1", "u7");
    let mut followers = vec![fixtures::follow_target("u7", false)];
    let mut feed = controller.watch();

    let outcome = controller.toggle(&mut detail, InteractionKind::Follow).await;
    feed.drain_into(&mut followers);

    assert_eq!(outcome, ToggleOutcome::Confirmed(InteractionState::flag(true)));
    assert!(detail.author.is_following);
    assert!(followers[0].is_following);
    assert_eq!(
        world.transport.calls_to("/follow")[0].payload,
        json!({"followingId": "u7"})
    );
    assert_notices(&world.notifier, &["Followed"])?;
    Ok(())
}
