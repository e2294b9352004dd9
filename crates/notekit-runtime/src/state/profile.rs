use super::NoteList;
use crate::interaction::Observer;
use notekit_types::{InteractionEvent, UserProfile};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileTab {
    Notes,
    Collections,
    Likes,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 3] = [Self::Notes, Self::Collections, Self::Likes];

    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Notes => "/users/noteList",
            Self::Collections => "/users/collectionList",
            Self::Likes => "/users/likedList",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Notes => "Notes",
            Self::Collections => "Collections",
            Self::Likes => "Likes",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Notes => 0,
            Self::Collections => 1,
            Self::Likes => 2,
        }
    }
}

impl fmt::Display for ProfileTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Own profile page: header plus one list per tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub user: Option<UserProfile>,
    pub current_tab: ProfileTab,
    tabs: [NoteList; 3],
}

impl ProfileView {
    pub fn new(page_size: u32) -> Self {
        Self {
            user: None,
            current_tab: ProfileTab::Notes,
            tabs: [
                NoteList::new(page_size),
                NoteList::new(page_size),
                NoteList::new(page_size),
            ],
        }
    }

    pub fn tab(&self, tab: ProfileTab) -> &NoteList {
        &self.tabs[tab.index()]
    }

    pub fn tab_mut(&mut self, tab: ProfileTab) -> &mut NoteList {
        &mut self.tabs[tab.index()]
    }

    pub fn nickname(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.nickname.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("Nickname not set")
    }

    pub fn bio(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.signature.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("No bio yet")
    }
}

impl Observer for ProfileView {
    fn apply_event(&mut self, event: &InteractionEvent) -> usize {
        self.tabs.iter_mut().map(|tab| tab.apply_event(event)).sum()
    }
}
