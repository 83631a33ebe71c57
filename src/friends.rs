use std::collections::BTreeMap;

use crate::common::{SearchResult, UserId};

/// Trạng thái nút kết bạn của một user trong kết quả tìm kiếm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendControl {
    Add,
    AlreadyFriends,
}

impl FriendControl {
    pub fn from_flag(is_friend: bool) -> Self {
        if is_friend {
            FriendControl::AlreadyFriends
        } else {
            FriendControl::Add
        }
    }

    pub fn is_disabled(self) -> bool {
        self == FriendControl::AlreadyFriends
    }

    pub fn label(self) -> &'static str {
        match self {
            FriendControl::Add => "Add friend",
            FriendControl::AlreadyFriends => "Friends",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFragment {
    Divider,
    Row {
        user_id: UserId,
        name: String,
        control: FriendControl,
    },
}

/// Search results as painted: a leading divider, then one row and one divider
/// per user. No results means nothing at all.
pub fn search_fragments(results: &[SearchResult]) -> Vec<SearchFragment> {
    if results.is_empty() {
        return Vec::new();
    }

    let mut fragments = Vec::with_capacity(results.len() * 2 + 1);
    fragments.push(SearchFragment::Divider);
    for result in results {
        fragments.push(SearchFragment::Row {
            user_id: result.user.id,
            name: result.user.name.clone(),
            control: FriendControl::from_flag(result.is_friend),
        });
        fragments.push(SearchFragment::Divider);
    }
    fragments
}

/// User search state plus every friend seen during this session.
#[derive(Debug, Default)]
pub struct FriendDirectory {
    query: String,
    results: Vec<SearchResult>,
    friends: BTreeMap<UserId, String>,
}

impl FriendDirectory {
    /// Records the current query. Returns the query to send when it is non-empty.
    pub fn begin_search(&mut self, query: &str) -> Option<String> {
        self.query = query.to_string();
        if query.is_empty() {
            return None;
        }
        Some(self.query.clone())
    }

    /// Replaces the visible results. Kết quả của query cũ bị bỏ qua.
    pub fn apply_results(&mut self, query: &str, results: Vec<SearchResult>) -> bool {
        if query != self.query {
            log::debug!("Dropping stale search results for `{query}`");
            return false;
        }
        for result in results.iter().filter(|result| result.is_friend) {
            self.friends
                .insert(result.user.id, result.user.name.clone());
        }
        self.results = results;
        true
    }

    /// Applied only after the server acknowledged the friend request. The
    /// friend is recorded even if the search results have moved on.
    pub fn mark_friend(&mut self, user_id: UserId, name: &str) {
        if let Some(result) = self
            .results
            .iter_mut()
            .find(|result| result.user.id == user_id)
        {
            result.is_friend = true;
        }
        self.friends.insert(user_id, name.to_string());
    }

    pub fn fragments(&self) -> Vec<SearchFragment> {
        search_fragments(&self.results)
    }

    pub fn friends(&self) -> impl Iterator<Item = (UserId, &str)> {
        self.friends.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub fn has_friends(&self) -> bool {
        !self.friends.is_empty()
    }
}
