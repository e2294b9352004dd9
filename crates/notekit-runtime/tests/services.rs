use anyhow::Result;
use notekit_runtime::navigation::Route;
use notekit_runtime::services::{
    CommentDraft, LoginForm, Media, MediaFile, ProfileUpdate, PublishDraft,
};
use notekit_runtime::state::{FeedView, ProfileTab, ProfileView};
use notekit_runtime::storage::{
    CredentialStore, TOKEN_KEY, USER_ID_KEY, USER_INFO_KEY, USER_PHONE_KEY,
};
use notekit_runtime::transport::Method;
use notekit_runtime::Error;
use notekit_testing::assertions::{assert_call_count, assert_notices};
use notekit_testing::{TestWorld, fixtures};
use notekit_types::{InteractionKind, SubjectId};
use serde_json::json;
use std::path::PathBuf;

fn ids(cards: &[notekit_types::NoteCard]) -> Vec<&str> {
    cards.iter().map(|card| card.id.as_str()).collect()
}

#[tokio::test]
async fn test_feed_pages_fill_waterfall_by_parity() -> Result<()> {
    let world = TestWorld::new();
    world
        .transport
        .respond("/latest", fixtures::latest_page(&["a", "b", "c"], 1, 2))
        .respond("/latest", fixtures::latest_page(&["d", "e"], 2, 2));
    let kit = world.client();
    let feed = kit.feed();
    let mut view = FeedView::new(10);

    feed.load_initial(&mut view).await?;
    assert_eq!(ids(&view.notes.left), vec!["a", "c"]);
    assert_eq!(ids(&view.notes.right), vec!["b"]);
    assert!(view.has_more);

    feed.load_more(&mut view).await?;
    assert_eq!(view.page_num, 2);
    assert!(!view.has_more);
    assert_eq!(ids(&view.notes.left), vec!["a", "c", "e"]);
    assert_eq!(ids(&view.notes.right), vec!["b", "d"]);

    feed.load_more(&mut view).await?;
    assert_call_count(&world.transport, 2)?;

    let second = &world.transport.calls_to("/latest")[1];
    assert_eq!(second.method, Method::Get);
    assert_eq!(second.payload, json!({ "page": 2, "pageSize": 10 }));
    Ok(())
}

#[tokio::test]
async fn test_no_more_data_ends_pagination_quietly() -> Result<()> {
    let world = TestWorld::new();
    world
        .transport
        .respond("/latest", fixtures::latest_page(&["a"], 1, 5))
        .respond("/latest", fixtures::failure("No more data"));
    let kit = world.client();
    let mut view = FeedView::new(10);

    kit.feed().load_initial(&mut view).await?;
    kit.feed().load_more(&mut view).await?;

    assert!(!view.has_more);
    assert!(!view.loading_more);
    assert_eq!(view.page_num, 1);
    assert_eq!(view.notes.len(), 1);
    assert!(world.notifier.messages().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_feed_failure_is_reported() -> Result<()> {
    let world = TestWorld::new();
    world.transport.respond("/latest", fixtures::failure("boom"));
    let kit = world.client();
    let mut view = FeedView::new(10);

    let err = kit.feed().load_initial(&mut view).await.unwrap_err();

    assert!(matches!(err, Error::Api { .. }));
    assert!(view.notes.is_empty());
    assert_notices(&world.notifier, &["Failed to load"])?;
    Ok(())
}

#[tokio::test]
async fn test_switching_tab_filters_by_category() -> Result<()> {
    let world = TestWorld::signed_in();
    world.store.set(USER_ID_KEY, "u1")?;
    world.transport.respond(
        "/categories",
        json!({
            "status": true,
            "data": [{ "id": "0", "name": "Recommended" }, { "id": "2", "name": "Food" }],
        }),
    );
    world
        .transport
        .always("/latest", fixtures::latest_page(&["a"], 1, 1));
    let kit = world.client();
    let feed = kit.feed();
    let mut view = FeedView::new(10);

    feed.load_categories(&mut view).await;
    let names: Vec<&str> = view.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert_eq!(names[1], "Food");

    feed.switch_tab(&mut view, 1).await?;
    feed.switch_tab(&mut view, 1).await?;

    let calls = world.transport.calls_to("/latest");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].payload["categoryId"], json!("2"));
    assert_eq!(calls[0].payload["userId"], json!("u1"));
    Ok(())
}

#[tokio::test]
async fn test_category_failure_keeps_recommended() -> Result<()> {
    let world = TestWorld::new();
    world
        .transport
        .respond("/categories", fixtures::failure("down"));
    let kit = world.client();

    let categories = kit.feed().categories().await;

    assert_eq!(categories.len(), 1);
    assert!(categories[0].is_recommended());
    assert_notices(&world.notifier, &["Failed to load categories"])?;
    Ok(())
}

#[tokio::test]
async fn test_note_load_merges_viewer_state() -> Result<()> {
    let world = TestWorld::signed_in();
    world
        .transport
        .respond(
            "/note/noteDetail/n1",
            json!({
                "status": true,
                "data": {
                    "noteDetail": { "title": "Tea", "likeCount": 4, "author": { "id": "u2" } },
                },
            }),
        )
        .respond(
            "/likesAndCollect/check",
            json!({ "status": true, "data": { "isLiked": true, "isCollected": false } }),
        )
        .respond(
            "/follow/status",
            json!({ "status": true, "data": { "isFollowing": true, "authorId": "u2" } }),
        );
    let kit = world.client();

    let detail = kit.notes().load(&SubjectId::new("n1")).await?;

    assert_eq!(detail.id.as_str(), "n1");
    assert!(detail.is_liked);
    assert!(!detail.is_collected);
    assert!(detail.author.is_following);
    assert_eq!(detail.like_count, 4);
    Ok(())
}

#[tokio::test]
async fn test_note_load_signed_out_skips_status_calls() -> Result<()> {
    let world = TestWorld::new();
    world.transport.respond(
        "/note/noteDetail/n1",
        json!({ "status": true, "data": { "noteDetail": { "id": "n1", "title": "Tea" } } }),
    );
    let kit = world.client();

    let detail = kit.notes().load(&SubjectId::new("n1")).await?;

    assert!(!detail.is_liked);
    assert_call_count(&world.transport, 1)?;
    Ok(())
}

#[tokio::test]
async fn test_comments_are_threaded() -> Result<()> {
    let world = TestWorld::new();
    world.transport.respond(
        "/comments",
        json!({
            "status": true,
            "data": { "comments": [
                fixtures::comment_json("c1", None, "2024-03-01 10:00:00"),
                fixtures::comment_json("c2", Some("c1"), "2024-03-01 11:00:00"),
                fixtures::comment_json("c3", None, "2024-03-02 09:00:00"),
                fixtures::comment_json("c4", Some("gone"), "2024-03-02 10:00:00"),
            ] },
        }),
    );
    let kit = world.client();

    let threads = kit.comments().list(&SubjectId::new("n1")).await?;

    assert_eq!(threads.len(), 2);
    assert_eq!(threads[0].comment.id.as_str(), "c1");
    assert_eq!(threads[0].replies.len(), 1);
    assert_eq!(threads[0].replies[0].id.as_str(), "c2");
    assert!(threads[1].replies.is_empty());
    assert!(!threads[0].comment.display_time.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_blank_comment_is_rejected_locally() -> Result<()> {
    let world = TestWorld::signed_in();
    let kit = world.client();

    let err = kit
        .comments()
        .submit(&CommentDraft::new("n1", "   "))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert_call_count(&world.transport, 0)?;
    assert_notices(&world.notifier, &["Please enter a comment"])?;
    Ok(())
}

#[tokio::test]
async fn test_reply_is_sent_with_target() -> Result<()> {
    let world = TestWorld::signed_in();
    world.transport.respond(
        "/comments/create",
        json!({
            "status": true,
            "data": fixtures::comment_json("c9", Some("c1"), "2024-03-01T10:00:00Z"),
        }),
    );
    let kit = world.client();

    let created = kit
        .comments()
        .submit(&CommentDraft::new("n1", " hello ").replying_to("c1"))
        .await?;

    assert_eq!(created.map(|c| c.id), Some(SubjectId::new("c9")));
    assert_eq!(
        world.transport.calls_to("/comments/create")[0].payload,
        json!({ "noteId": "n1", "content": "hello", "replyToId": "c1" })
    );
    assert_notices(&world.notifier, &["Sent"])?;
    Ok(())
}

#[tokio::test]
async fn test_comment_failure_reports_server_message() -> Result<()> {
    let world = TestWorld::signed_in();
    world
        .transport
        .respond("/comments/create", fixtures::failure("Too fast"));
    let kit = world.client();

    let err = kit
        .comments()
        .submit(&CommentDraft::new("n1", "hi"))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Too fast");
    assert_notices(&world.notifier, &["Too fast"])?;
    Ok(())
}

#[tokio::test]
async fn test_search_results_and_empty_hint() -> Result<()> {
    let world = TestWorld::new();
    world
        .transport
        .respond(
            "/search/comprehensive",
            json!({
                "status": true,
                "data": {
                    "notes": [fixtures::card_json("n1")],
                    "total": 1,
                    "currentPage": 1,
                    "totalPages": 1,
                },
            }),
        )
        .respond(
            "/search/comprehensive",
            json!({ "status": true, "data": { "notes": [] } }),
        );
    let kit = world.client();

    let results = kit.search().search("  tea ").await?;
    assert_eq!(results.keyword, "tea");
    assert_eq!(results.total, 1);
    assert!(!results.has_more());
    assert_eq!(
        world.transport.calls()[0].payload,
        json!({ "keyword": "tea" })
    );

    let empty = kit.search().search("nothing").await?;
    assert!(empty.is_empty());
    assert_notices(&world.notifier, &["No matching content"])?;

    let err = kit.search().search("   ").await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert_call_count(&world.transport, 2)?;
    Ok(())
}

#[tokio::test]
async fn test_login_stores_session_and_goes_home() -> Result<()> {
    let world = TestWorld::new();
    world.transport.respond(
        "/auth/login",
        json!({
            "status": true,
            "message": "Welcome back",
            "data": { "token": "t1", "user": fixtures::user_json("u9", "kai") },
        }),
    );
    let kit = world.client();

    let user = kit
        .auth()
        .login(&LoginForm::new("13800000000", "secret1", true))
        .await?;

    assert_eq!(user.map(|u| u.nickname), Some("kai".to_string()));
    assert_eq!(world.store.get(TOKEN_KEY).as_deref(), Some("t1"));
    assert_eq!(world.store.get(USER_ID_KEY).as_deref(), Some("u9"));
    assert!(kit.session().is_signed_in());
    assert_eq!(world.navigator.routes(), vec![Route::Home]);
    assert_notices(&world.notifier, &["Welcome back"])?;
    assert_eq!(
        world.transport.calls_to("/auth/login")[0].payload,
        json!({ "login": "13800000000", "password": "secret1" })
    );
    Ok(())
}

#[tokio::test]
async fn test_login_validation_and_missing_token() -> Result<()> {
    let world = TestWorld::new();
    world
        .transport
        .respond("/auth/login", json!({ "status": true, "data": {} }));
    let kit = world.client();

    let err = kit
        .auth()
        .login(&LoginForm::new("138", "secret1", true))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert_call_count(&world.transport, 0)?;

    let err = kit
        .auth()
        .login(&LoginForm::new("13800000000", "secret1", true))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Sign-in failed");
    assert!(!kit.session().is_signed_in());
    assert!(world.navigator.routes().is_empty());
    assert_notices(
        &world.notifier,
        &["Enter an 11-digit phone number", "Sign-in failed"],
    )?;
    Ok(())
}

#[tokio::test]
async fn test_logout_keeps_phone() -> Result<()> {
    let world = TestWorld::signed_in();
    world.store.set(USER_ID_KEY, "u9")?;
    world.store.set(USER_PHONE_KEY, "13800000000")?;
    let kit = world.client();

    kit.auth().logout()?;

    assert_eq!(world.store.get(TOKEN_KEY), None);
    assert_eq!(world.store.get(USER_ID_KEY), None);
    assert_eq!(world.store.get(USER_PHONE_KEY).as_deref(), Some("13800000000"));
    assert_eq!(world.navigator.routes(), vec![Route::SignIn]);
    assert_notices(&world.notifier, &["Signed out"])?;
    Ok(())
}

#[tokio::test]
async fn test_profile_requires_sign_in() -> Result<()> {
    let world = TestWorld::new();
    let kit = world.client();
    let mut view = ProfileView::new(10);

    let err = kit
        .profile()
        .load_tab(&mut view, ProfileTab::Notes, true)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::SignInRequired));
    assert_call_count(&world.transport, 0)?;
    assert_notices(&world.notifier, &["Please sign in"])?;
    Ok(())
}

#[tokio::test]
async fn test_profile_notes_tab_fills_header_and_authors() -> Result<()> {
    let world = TestWorld::signed_in();
    world.transport.respond(
        "/users/noteList",
        json!({
            "status": true,
            "data": {
                "user": fixtures::user_json("u9", "kai"),
                "notes": [{ "id": "n1", "title": "Mine", "likeCount": 2 }],
                "pagination": { "current": 1, "totalPages": 3 },
            },
        }),
    );
    let kit = world.client();
    let mut view = ProfileView::new(10);

    kit.profile()
        .load_tab(&mut view, ProfileTab::Notes, true)
        .await?;

    assert_eq!(view.nickname(), "kai");
    assert_eq!(view.bio(), "No bio yet");
    let notes = view.tab(ProfileTab::Notes);
    assert!(notes.has_more);
    assert_eq!(notes.notes.items[0].author.id.as_str(), "u9");
    assert_eq!(notes.notes.items[0].author.nickname, "kai");
    assert_eq!(world.store.get(USER_ID_KEY).as_deref(), Some("u9"));
    assert!(view.tab(ProfileTab::Likes).notes.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_profile_update_rejects_non_image_avatar() -> Result<()> {
    let world = TestWorld::signed_in();
    let kit = world.client();
    let update = ProfileUpdate {
        nickname: "kai".to_string(),
        signature: String::new(),
        avatar: Some(PathBuf::from("/tmp/clip.mp4")),
    };

    let err = kit.profile().update(&update).await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert_call_count(&world.transport, 0)?;
    assert_notices(&world.notifier, &["Only image files can be uploaded"])?;
    Ok(())
}

#[tokio::test]
async fn test_profile_update_uploads_avatar_with_fields() -> Result<()> {
    let world = TestWorld::signed_in();
    world.transport.respond(
        "/users/updateUserInfo",
        json!({ "status": true, "data": fixtures::user_json("u9", "kai2") }),
    );
    let kit = world.client();
    let update = ProfileUpdate {
        nickname: " kai2 ".to_string(),
        signature: "hello".to_string(),
        avatar: Some(PathBuf::from("/tmp/me.png")),
    };

    let user = kit.profile().update(&update).await?;

    assert_eq!(user.map(|u| u.nickname), Some("kai2".to_string()));
    let call = &world.transport.calls_to("/users/updateUserInfo")[0];
    assert_eq!(call.file, Some(PathBuf::from("/tmp/me.png")));
    assert_eq!(call.form.get("nickname").map(String::as_str), Some("kai2"));
    assert_eq!(call.form.get("signature").map(String::as_str), Some("hello"));
    assert_eq!(kit.session().user().map(|u| u.nickname), Some("kai2".to_string()));
    assert_notices(&world.notifier, &["Saved"])?;
    Ok(())
}

#[tokio::test]
async fn test_profile_update_without_user_keeps_cached_identity() -> Result<()> {
    let world = TestWorld::signed_in();
    world
        .transport
        .respond("/users/updateUserInfo", json!({ "status": true, "data": null }));
    let kit = world.client();
    world
        .store
        .set(USER_INFO_KEY, &fixtures::user_json("u9", "kai").to_string())?;
    world.store.set(USER_ID_KEY, "u9")?;
    let update = ProfileUpdate {
        nickname: "kai2".to_string(),
        signature: "hello".to_string(),
        avatar: None,
    };

    kit.profile().update(&update).await?;

    let cached = kit.session().user().expect("user info still cached");
    assert_eq!(cached.id.as_str(), "u9");
    assert_eq!(cached.nickname, "kai2");
    assert_eq!(cached.signature, "hello");
    assert_eq!(world.store.get(USER_ID_KEY).as_deref(), Some("u9"));
    assert_notices(&world.notifier, &["Saved"])?;
    Ok(())
}

#[tokio::test]
async fn test_profile_update_in_flight_suppresses_second_save() -> Result<()> {
    let world = TestWorld::signed_in();
    let kit = world.client();
    let update = ProfileUpdate {
        nickname: "kai".to_string(),
        ..Default::default()
    };

    world.transport.hold();
    let second = async {
        world.transport.wait_for_calls(1).await;
        let outcome = kit.profile().update(&update).await;
        world.transport.release();
        outcome
    };
    let profile = kit.profile();
    let (first, second) = tokio::join!(profile.update(&update), second);

    assert!(first?.is_some());
    assert!(second?.is_none());
    assert_call_count(&world.transport, 1)?;
    Ok(())
}

fn image_draft(count: usize) -> PublishDraft {
    let mut draft = PublishDraft::new("Weekend");
    draft.category_id = Some(SubjectId::new("2"));
    draft.media = Media::Images(
        (0..count)
            .map(|i| MediaFile::new(format!("/tmp/{}.png", i), 100))
            .collect(),
    );
    draft
}

#[tokio::test]
async fn test_publish_images_uploads_then_creates() -> Result<()> {
    let world = TestWorld::signed_in();
    world
        .transport
        .respond(
            "/note/upload-single-image",
            json!({ "status": true, "data": { "imageUrl": "https://cdn/0.png" } }),
        )
        .respond(
            "/note/upload-single-image",
            json!({ "status": true, "data": { "imageUrl": "https://cdn/1.png" } }),
        )
        .respond("/note/create-image-note", fixtures::ok());
    let kit = world.client();

    kit.publish().publish(&image_draft(2)).await?;

    let create = &world.transport.calls_to("/note/create-image-note")[0];
    assert_eq!(
        create.payload["imageUrls"],
        json!(["https://cdn/0.png", "https://cdn/1.png"])
    );
    assert_eq!(create.payload["categoryId"], json!("2"));
    assert_eq!(world.notifier.open_spinners(), 0);
    assert_notices(&world.notifier, &["Published"])?;
    assert_eq!(world.navigator.routes(), vec![Route::Home]);
    Ok(())
}

#[tokio::test]
async fn test_publish_stops_at_failed_image() -> Result<()> {
    let world = TestWorld::signed_in();
    world
        .transport
        .respond(
            "/note/upload-single-image",
            json!({ "status": true, "data": { "imageUrl": "https://cdn/0.png" } }),
        )
        .respond("/note/upload-single-image", fixtures::failure("too large"));
    let kit = world.client();

    let err = kit.publish().publish(&image_draft(3)).await.unwrap_err();

    assert_eq!(err.user_message(), "Image 2 failed to upload: too large");
    assert_eq!(world.transport.calls_to("/note/upload-single-image").len(), 2);
    assert!(world.transport.calls_to("/note/create-image-note").is_empty());
    assert_notices(&world.notifier, &["Image 2 failed to upload: too large"])?;
    assert!(world.navigator.routes().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_publish_video_sends_form_fields() -> Result<()> {
    let world = TestWorld::signed_in();
    let kit = world.client();
    let mut draft = PublishDraft::new(" Trip ");
    draft.content = "day one".to_string();
    draft.media = Media::Video(MediaFile::new("/tmp/trip.mp4", 1024));

    kit.publish().publish(&draft).await?;

    let call = &world.transport.calls_to("/note/upload-video")[0];
    assert_eq!(call.file, Some(PathBuf::from("/tmp/trip.mp4")));
    assert_eq!(call.form.get("title").map(String::as_str), Some("Trip"));
    assert_eq!(call.form.get("content").map(String::as_str), Some("day one"));
    Ok(())
}

#[tokio::test]
async fn test_publish_without_media_is_refused() -> Result<()> {
    let world = TestWorld::signed_in();
    let kit = world.client();

    let err = kit
        .publish()
        .publish(&PublishDraft::new("Title only"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert_call_count(&world.transport, 0)?;
    Ok(())
}

#[tokio::test]
async fn test_client_controller_updates_loaded_feed() -> Result<()> {
    let world = TestWorld::signed_in();
    world
        .transport
        .respond("/latest", fixtures::latest_page(&["a", "b"], 1, 1));
    let kit = world.client();
    let mut view = FeedView::new(10);
    let mut watch = kit.interactions().watch();
    kit.feed().load_initial(&mut view).await?;

    let mut opened = view.notes.items[1].clone();
    kit.interactions()
        .toggle(&mut opened, InteractionKind::Like)
        .await;
    watch.drain_into(&mut view);

    assert!(view.notes.items[1].is_liked);
    assert_eq!(view.notes.right[0].like_count, 2);
    Ok(())
}
