//! Sample view state and API payloads.

use notekit_types::{DetailAuthor, FollowTarget, NoteCard, NoteDetail, SubjectId};
use serde_json::{Value, json};

pub const TEST_TOKEN: &str = "test-token";

pub fn note_card(id: &str, is_liked: bool, like_count: u64) -> NoteCard {
    NoteCard {
        id: SubjectId::new(id),
        title: format!("Note {}", id),
        is_liked,
        like_count,
        ..Default::default()
    }
}

pub fn collected_card(id: &str, is_collected: bool, collect_count: u64) -> NoteCard {
    NoteCard {
        is_collected,
        collect_count,
        ..note_card(id, false, 0)
    }
}

pub fn note_detail(id: &str, author_id: &str) -> NoteDetail {
    NoteDetail {
        id: SubjectId::new(id),
        title: format!("Note {}", id),
        author: DetailAuthor {
            id: SubjectId::new(author_id),
            nickname: format!("user {}", author_id),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn follow_target(user_id: &str, is_following: bool) -> FollowTarget {
    FollowTarget::new(user_id, is_following)
}

pub fn ok() -> Value {
    json!({ "status": true, "message": "ok" })
}

pub fn failure(message: &str) -> Value {
    json!({ "status": false, "message": message })
}

/// Card payload as list endpoints send it.
pub fn card_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Note {}", id),
        "likeCount": 1,
        "author": { "id": "u1", "nickname": "kai" },
    })
}

/// `/latest` body for the given note ids.
pub fn latest_page(ids: &[&str], current_page: u32, total_pages: u32) -> Value {
    let data: Vec<Value> = ids.iter().map(|id| card_json(id)).collect();
    json!({
        "status": true,
        "data": { "data": data, "currentPage": current_page, "totalPages": total_pages },
    })
}

pub fn user_json(id: &str, nickname: &str) -> Value {
    json!({
        "id": id,
        "nickname": nickname,
        "phone": "13800000000",
        "signature": null,
        "stats": { "followCount": 2, "fansCount": 5, "likeCollectCount": 9 },
    })
}

pub fn comment_json(id: &str, reply_to: Option<&str>, created_at: &str) -> Value {
    json!({
        "id": id,
        "content": format!("comment {}", id),
        "createdAt": created_at,
        "author": { "id": "u1", "nickname": "kai" },
        "replyTo": reply_to.map(|target| json!({ "id": target, "content": "earlier" })),
    })
}
