use notekit_types::{NoteCard, SubjectId};
use std::fmt;

/// Screens the client can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Home,
    Search { keyword: Option<String> },
    NoteDetail { id: SubjectId },
    VideoDetail { id: SubjectId },
    Profile,
    Settings,
    Publish,
    Back,
}

impl Route {
    /// Detail screen matching the card's media type.
    pub fn for_note(note: &NoteCard) -> Self {
        if note.is_video {
            Route::VideoDetail {
                id: note.id.clone(),
            }
        } else {
            Route::NoteDetail {
                id: note.id.clone(),
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::SignIn => "/login".to_string(),
            Route::Home => "/".to_string(),
            Route::Search { keyword: None } => "/search".to_string(),
            Route::Search {
                keyword: Some(keyword),
            } => format!("/search?keyword={}", keyword),
            Route::NoteDetail { id } => format!("/notes/{}", id),
            Route::VideoDetail { id } => format!("/videos/{}", id),
            Route::Profile => "/profile".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::Publish => "/publish".to_string(),
            Route::Back => "..".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Fire-and-forget screen transitions.
pub trait Navigator: Send + Sync {
    fn go_to(&self, route: Route);

    /// Screen currently shown, when the navigator tracks it.
    fn current(&self) -> Option<Route> {
        None
    }
}
